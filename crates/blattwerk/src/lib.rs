//! Layout analysis for scientific PDFs.
//!
//! blattwerk recovers the logical reading structure of a document from
//! the positioned characters a PDF content-stream interpreter produces:
//! paragraphs with semantic roles, words, characters, figures, and
//! shapes, together with their geometry, fonts, and colors. The result
//! serializes as XML, JSON, or plain text.
//!
//! The pipeline runs in dependency order: characters cluster into lines,
//! lines group into blocks, document statistics are finalized, an ordered
//! registry of rule modules assigns semantic roles, and blocks join into
//! paragraphs. See [`Pipeline`] for the entry point:
//!
//! ```no_run
//! use blattwerk::{Pipeline, Serializer, XmlSerializer};
//!
//! # fn produce_document() -> blattwerk::Document { blattwerk::Document::default() }
//! # fn main() -> blattwerk::Result<()> {
//! let doc = Pipeline::default().run(produce_document())?;
//! let xml = XmlSerializer::new().serialize(&doc)?;
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod producer;
pub mod semantic;
pub mod serialize;
pub mod stats;
pub mod tokenize;
pub mod types;

pub use cancel::CancelToken;
pub use config::{BlockConfig, LayoutConfig, LineConfig, ParagraphConfig, SemanticConfig};
pub use error::{ExtractionError, Result};
pub use observer::{Diagnostic, DiagnosticObserver, NullObserver, TracingObserver};
pub use pipeline::Pipeline;
pub use producer::{CharacterProducer, DocumentBuilder};
pub use serialize::{JsonSerializer, SerializeOptions, Serializer, TxtSerializer, Visualizer, XmlSerializer};
pub use tokenize::Dictionary;
pub use types::{
    Character, Color, Document, ExtractionUnit, Figure, Font, FontFace, Page, Paragraph, Position, Rectangle,
    SemanticRole, Shape, TextBlock, TextLine, Word,
};
