pub mod edit;
pub mod init;
pub mod style;
pub mod tree;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use style::{style, StyleArgs};
pub use tree::{tree, TreeArgs};
