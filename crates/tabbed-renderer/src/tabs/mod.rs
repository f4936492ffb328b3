//! Nested tab groups rendered from a resolved field tree.
//!
//! A tab group is the `tabs` repeater of a [`FieldTree`](tabbed_fields::FieldTree):
//! each row has a `title`, optional rich-text `content`, and an optional
//! `tabs` repeater of its own that renders as a nested group inside the
//! row's panel.
//!
//! # Output HTML Structure
//!
//! ```html
//! <div class="js-tabs tabs-after-content js-tabs-parent">
//!   <ul class="js-tablist">
//!     <li class="js-tablist__item">
//!       <a href="#tab-intro" id="label_tab-intro" class="js-tablist__link">Intro</a>
//!     </li>
//!   </ul>
//!   <div id="tab-intro" class="js-tabcontent">
//!     <!-- content, then nested <div class="js-tabs js-tabs-nested"> -->
//!   </div>
//! </div>
//! ```
//!
//! (Whitespace added for readability; the renderer emits none between tags.)
//!
//! # Render passes
//!
//! All groups on one page share a [`RenderPass`]. It makes sure the
//! companion assets are enqueued once and that no two tabs get the same id.

mod pass;
mod renderer;

pub use pass::RenderPass;
pub use renderer::TabsRenderer;
