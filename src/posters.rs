use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

/// Poster shown for movies created without an upload. Never deleted.
pub const DEFAULT_POSTER: &str = "/images/movies/default.jpg";

const PUBLIC_PREFIX: &str = "/images/movies";

/// An uploaded poster image, drained from the multipart form.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Poster files on disk under `{static_dir}/images/movies`, addressed by
/// their public url path.
#[derive(Clone, Debug)]
pub struct PosterStore {
    dir: PathBuf,
}

impl PosterStore {
    pub fn new(static_dir: &Path) -> Self {
        Self { dir: static_dir.join("images").join("movies") }
    }

    /// Writes the upload under a fresh unique name, keeping the original
    /// extension, and returns the public path.
    pub async fn save(&self, upload: &Upload) -> io::Result<String> {
        fs::create_dir_all(&self.dir).await?;

        let ext = Path::new(&upload.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let name = format!("{}{}", Uuid::new_v4(), ext);

        fs::write(self.dir.join(&name), &upload.data).await?;
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }

    /// Removes the file behind a poster url. The default poster and anything
    /// outside the poster directory are left alone; a file already gone is
    /// not an error.
    pub async fn delete(&self, poster_url: &str) -> io::Result<()> {
        if poster_url == DEFAULT_POSTER {
            return Ok(());
        }
        let Some(name) = poster_url.strip_prefix(PUBLIC_PREFIX).and_then(|p| p.strip_prefix('/'))
        else {
            return Ok(());
        };
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Ok(());
        }

        match fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}
