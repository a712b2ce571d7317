pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod frontend;
pub mod sketch;
pub mod synth;

pub use config::PreludeSettings;
pub use driver::{Invocation, Mode, run};
pub use emit::{COMPOSITE_IDENTITY, ENVIRONMENT_LINE, emit_composite_dump, emit_prototypes};
pub use error::PreludeError;
pub use frontend::{ChildVisit, ClangCursor, ClangFrontEnd, Cursor, CursorKind, Location, Visitor, visit_children};
pub use sketch::{FileFilter, Sketch};
pub use synth::{Declarations, Synthesizer, synthesize};
