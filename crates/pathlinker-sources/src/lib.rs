//! pathlinker-sources — Clients for the two remote databases PathLinker
//! reads from, behind provider traits so the graph assembler can be driven
//! by mocks in tests:
//! - STRING: identifier mapping and the interaction network
//! - KEGG REST: gene lookup, gene → pathway links, pathway records

pub mod interaction;
pub mod pathway;
pub mod string_db;
pub mod kegg;

pub use interaction::{InteractionSource, MockInteractionSource};
pub use pathway::{MockPathwaySource, PathwaySource};
pub use string_db::StringDbClient;
pub use kegg::KeggClient;
