use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Chain, Cursor, Read};
use std::path::Path;

use crate::error_handling::FileError;

type ChainReader = Chain<Cursor<Vec<u8>>, File>;
type GzipReader = BufReader<MultiGzDecoder<ChainReader>>;
type ZstdReader = BufReader<zstd::Decoder<'static, BufReader<ChainReader>>>;
type PlainReader = BufReader<ChainReader>;

/// Streaming reader over a registry file, decompressing rotated archives on the fly
/// Detects gzip (1F 8B 08) and zstd (28 B5 2F FD) compression using magic bytes
pub enum RegistryInput {
    Gzip(GzipReader),
    Zstd(ZstdReader),
    Plain(PlainReader),
}

impl std::fmt::Debug for RegistryInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryInput::Gzip(_) => write!(f, "RegistryInput::Gzip"),
            RegistryInput::Zstd(_) => write!(f, "RegistryInput::Zstd"),
            RegistryInput::Plain(_) => write!(f, "RegistryInput::Plain"),
        }
    }
}

impl BufRead for RegistryInput {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            RegistryInput::Gzip(reader) => reader.fill_buf(),
            RegistryInput::Zstd(reader) => reader.fill_buf(),
            RegistryInput::Plain(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            RegistryInput::Gzip(reader) => reader.consume(amt),
            RegistryInput::Zstd(reader) => reader.consume(amt),
            RegistryInput::Plain(reader) => reader.consume(amt),
        }
    }
}

impl Read for RegistryInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            RegistryInput::Gzip(reader) => reader.read(buf),
            RegistryInput::Zstd(reader) => reader.read(buf),
            RegistryInput::Plain(reader) => reader.read(buf),
        }
    }
}

impl RegistryInput {
    /// Open a registry file read-only and pick a decoder from its first bytes
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let path = path.as_ref();

        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            if extension.eq_ignore_ascii_case("zip") {
                return Err(FileError::Unsupported {
                    path: path.to_path_buf(),
                    reason: format!(
                        "zip archives cannot be streamed, extract it first: unzip {}",
                        path.display()
                    ),
                });
            }
        }

        let open_error = |source| FileError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        detect_compression(file).map_err(open_error)
    }

    pub fn is_compressed(&self) -> bool {
        !matches!(self, RegistryInput::Plain(_))
    }
}

fn detect_compression(mut file: File) -> std::io::Result<RegistryInput> {
    let mut head = [0u8; 4];
    let n = read_head(&mut file, &mut head)?;

    // Put the read bytes back in front using a cursor chain
    let prefix = Cursor::new(head[..n].to_vec());
    let chained = prefix.chain(file);

    let is_gzip = n >= 3 && head[0] == 0x1F && head[1] == 0x8B && head[2] == 0x08;
    let is_zstd =
        n >= 4 && head[0] == 0x28 && head[1] == 0xB5 && head[2] == 0x2F && head[3] == 0xFD;

    if is_gzip {
        let decoder = MultiGzDecoder::new(chained);
        Ok(RegistryInput::Gzip(BufReader::new(decoder)))
    } else if is_zstd {
        let decoder = zstd::Decoder::new(chained)?;
        Ok(RegistryInput::Zstd(BufReader::new(decoder)))
    } else {
        Ok(RegistryInput::Plain(BufReader::new(chained)))
    }
}

// A single read() may return fewer bytes than are available
fn read_head(file: &mut File, head: &mut [u8; 4]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < head.len() {
        match file.read(&mut head[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
