//! Manuscript normalization and LaTeX compilation for folio books
//!
//!     A folio manuscript is plain text, one element per line: the first line is the book title,
//!     the second the author, lines starting with `+` are headings (more `+` means deeper), a
//!     `---` line opens or closes a table whose rows separate fields with `|`, and everything
//!     else is a paragraph. Full-width parentheses `（…）` mark author comments.
//!
//! Architecture
//!
//!     Two stages, each a single forward pass over [`reader::Line`]s:
//!
//!     raw text ─▶ normalize ─▶ canonical text ─▶ compile ─▶ events ─▶ emitter ─▶ LaTeX
//!
//!     The normalizer (./normalize.rs) repairs hand-edited manuscripts: it drops blank lines,
//!     collapses whitespace, pairs quotation marks and rejoins hard-wrapped sentences.
//!
//!     The compiler (./compile.rs) parses canonical text into the document model
//!     (./ir/nodes.rs). It does not write output itself. Each construct becomes an event
//!     (./ir/events.rs) that goes to an [`Emitter`] the moment it is recognised. Output is
//!     therefore produced in the same pass as parsing. A structural error leaves exactly the
//!     output that preceded the offending line.
//!
//!     Either stage can run alone. Hand-written canonical text is valid compiler input.
//!
//!     This is a pure lib. File handling for whole batches lives in ./batch.rs; argument
//!     parsing and process exit codes belong to folio-cli.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FolioError, StructuralError, Violation
//!     ├── reader.rs               # Line reader shared by both stages
//!     ├── syntax.rs               # Markers, glyphs, inline comment parsing
//!     ├── normalize.rs            # Normalizer
//!     ├── compile.rs              # Structural compiler
//!     ├── emitter.rs              # Emitter trait + in-memory event log
//!     ├── formats
//!     │   └── latex               # XeLaTeX emitter and its options
//!     ├── ir                      # Document model and event stream
//!     ├── batch.rs                # Multi-file driver
//!     └── transforms.rs           # String-in, string-out helpers
//!
//! Errors
//!
//!     Failing to open an input or create an output is recoverable: a batch logs it and moves
//!     on. Any [`StructuralError`] is fatal to the file being converted. It is raised at the
//!     first inconsistent line, and nothing after that line is read.

pub mod batch;
pub mod compile;
pub mod emitter;
pub mod error;
pub mod formats;
pub mod ir;
pub mod normalize;
pub mod reader;
pub mod syntax;
pub mod transforms;

pub use compile::{compile, compile_str, Compiler};
pub use emitter::{Emitter, EventLog};
pub use error::{FolioError, Location, StructuralError, Violation};
pub use formats::latex::{LatexEmitter, LatexOptions};
pub use ir::nodes::Document;
pub use normalize::{normalize, normalize_str, Normalizer};
