//! Static asset serving for the bundled single-page app.
//!
//! Every path not claimed by `/ws` or `/health` serves from the
//! configured asset directory; unknown paths fall back to `index.html`
//! so client-side routes resolve.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Builds the static-file service with the SPA fallback.
pub fn service(static_dir: &Path) -> ServeDir<ServeFile> {
    let index = static_dir.join("index.html");
    ServeDir::new(static_dir).fallback(ServeFile::new(index))
}
