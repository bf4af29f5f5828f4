use std::fmt;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use bzip2::read::MultiBzDecoder;

/// Chunks of decompressed xz data waiting to be parsed.
const XZ_CHANNEL_DEPTH: usize = 16;
const XZ_CHUNK_BYTES: usize = 256 * 1024;

/// Compression format of a dump file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
    Xz,
}

impl Compression {
    /// Guess from the file extension: `.bz2`, `.xz`, anything else is plain.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bz2") => Compression::Bzip2,
            Some(ext) if ext.eq_ignore_ascii_case("xz") => Compression::Xz,
            _ => Compression::None,
        }
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Compression::None),
            "bz2" | "bzip2" => Ok(Compression::Bzip2),
            "xz" => Ok(Compression::Xz),
            other => Err(format!(
                "unknown compression '{other}' (expected none, bz2 or xz)"
            )),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compression::None => "none",
            Compression::Bzip2 => "bz2",
            Compression::Xz => "xz",
        })
    }
}

/// Wrap `inner` so that reading yields decompressed bytes.
pub fn open_reader<R>(inner: R, compression: Compression) -> Box<dyn BufRead + Send>
where
    R: Read + Send + 'static,
{
    match compression {
        Compression::None => Box::new(BufReader::new(inner)),
        Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(inner))),
        Compression::Xz => Box::new(BufReader::new(xz_reader(inner))),
    }
}

/// Stream an xz input through a background decoder thread.
///
/// lzma-rs only decodes xz into a `Write`, so the decoder pushes its output
/// through a bounded channel and the returned reader pulls from it. A decode
/// error shows up as an `io::Error` on the reading side once the data before
/// it has been consumed.
pub fn xz_reader<R>(inner: R) -> ChannelReader
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(XZ_CHANNEL_DEPTH);
    let errors = tx.clone();
    thread::spawn(move || {
        let mut input = BufReader::new(inner);
        let mut output = BufWriter::with_capacity(XZ_CHUNK_BYTES, ChannelWriter::new(tx));
        let decoded = lzma_rs::xz_decompress(&mut input, &mut output);
        // Whatever decoded cleanly goes out before the error does.
        let flushed = output.flush();
        let result = match decoded {
            Ok(()) => flushed,
            Err(err) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("xz: {err:?}"),
            )),
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, "xz decoder stopped");
            // The reader may already be gone.
            let _ = errors.send(Err(err));
        }
    });
    ChannelReader::new(rx)
}

type Chunk = io::Result<Vec<u8>>;

/// `Write` end of the decoder channel. Fails with `BrokenPipe` once the reader is gone.
pub struct ChannelWriter {
    tx: SyncSender<Chunk>,
}

impl ChannelWriter {
    fn new(tx: SyncSender<Chunk>) -> Self {
        Self { tx }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        self.tx
            .send(Ok(data.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "xz reader dropped"))?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `Read` end of the decoder channel. End of input once every sender is dropped.
pub struct ChannelReader {
    rx: Receiver<Chunk>,
    chunk: Vec<u8>,
    pos: usize,
}

impl ChannelReader {
    fn new(rx: Receiver<Chunk>) -> Self {
        Self {
            rx,
            chunk: Vec::new(),
            pos: 0,
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos == self.chunk.len() {
            match self.rx.recv() {
                Ok(Ok(chunk)) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Ok(Err(err)) => return Err(err),
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
