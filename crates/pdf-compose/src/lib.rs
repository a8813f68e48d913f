pub mod codec;
mod descriptor;
mod documents;
mod gesture;
mod merge;
mod options;
mod sequence;
mod session;
mod thumbnail;
mod types;

pub use codec::{TempPdf, image_to_temp_pdf, load_pdf, open_document, save_pdf};
pub use descriptor::*;
pub use documents::{DocumentStore, SourceDocuments};
pub use gesture::*;
pub use merge::*;
pub use options::*;
pub use sequence::PageSequence;
pub use session::*;
pub use thumbnail::*;
pub use types::*;
