//! Content hashing

use crate::PipelineError;
use librarian_domain::ContentHash;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Buffer size for reading files (8KB)
const BUFFER_SIZE: usize = 8192;

/// Compute the SHA-256 content hash of a file
///
/// Same bytes, same hash, whatever the file is called.
pub fn hash_file(path: &Path) -> Result<ContentHash, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    // Read and hash in chunks
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| PipelineError::io(path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash::new(hex::encode(hasher.finalize())))
}
