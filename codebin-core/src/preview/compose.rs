//! Composition of the preview document from the three sources

use serde::{Deserialize, Serialize};

use crate::models::{DocumentId, Documents};

/// Default location of the debug console library
pub const DEFAULT_CONSOLE_SCRIPT: &str = "/libraries/eruda/eruda.min.js";

/// Display options for the in-preview debug console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleOptions {
    /// URL of the console library script
    pub script_src: String,
    /// Overlay size as a percentage of the preview height
    pub display_size: u8,
    /// Overlay opacity between 0 and 1
    pub transparency: f64,
    /// Named console theme
    pub theme: String,
    /// Mount the console inside a shadow root
    pub use_shadow_dom: bool,
    /// Scale the console for small viewports
    pub auto_scale: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            script_src: DEFAULT_CONSOLE_SCRIPT.to_string(),
            display_size: 50,
            transparency: 0.9,
            theme: "Monokai Pro".to_string(),
            use_shadow_dom: true,
            auto_scale: true,
        }
    }
}

impl ConsoleOptions {
    /// JSON argument passed to the console's `init` call
    #[must_use]
    pub fn init_options(&self) -> serde_json::Value {
        serde_json::json!({
            "useShadowDom": self.use_shadow_dom,
            "autoScale": self.auto_scale,
            "defaults": {
                "displaySize": self.display_size,
                "transparency": self.transparency,
                "theme": self.theme,
            }
        })
    }

    /// Script tags that load, initialize and show the console
    #[must_use]
    pub fn bootstrap(&self) -> String {
        format!(
            "    <script src=\"{src}\"></script>\n    <script>\n      if (window.eruda) {{\n        eruda.init({options});\n        eruda.show();\n      }}\n    </script>\n",
            src = self.script_src,
            options = self.init_options(),
        )
    }
}

/// Builds the full preview document.
///
/// Order matters: the style block in the head, the markup as body content,
/// the console bootstrap (when `console` is given), then the user script
/// last so console instrumentation sees its errors.
#[must_use]
pub fn compose_document(documents: &Documents, console: Option<&ConsoleOptions>) -> String {
    let style = documents.content(DocumentId::Style);
    let markup = documents.content(DocumentId::Markup);
    let script = documents.content(DocumentId::Script);
    let bootstrap = console.map(ConsoleOptions::bootstrap).unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <style>{style}</style>\n  </head>\n  <body>\n{markup}\n{bootstrap}    <script>\n{script}\n    </script>\n  </body>\n</html>\n"
    )
}
