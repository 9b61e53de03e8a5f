//! pathlinker-web — JSON API in front of the network service.
//! Serves the element list and status line a graph viewer needs:
//!   - `/api/network` (GET query string or POST JSON)
//!   - `/api/health`

pub mod router;
pub mod handlers;
pub mod state;
