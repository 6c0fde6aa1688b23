pub mod history;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod session;
pub mod shortcuts;

pub use history::History;
pub use input::{KeyEvent, Modifiers};
pub use interaction::{Interaction, InteractionMode};
pub use selection::{PendingText, Selection};
pub use session::{EditorSession, GeneratedContent};
pub use shortcuts::{ShortcutAction, ShortcutMap};
