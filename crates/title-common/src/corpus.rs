//! Streaming reader for MediaWiki XML dumps (`pages-articles` exports).
//!
//! Only the page header is kept: `<title>`, `<ns>` and the `title` attribute of
//! `<redirect>`. Revisions and `<siteinfo>` are skipped without being buffered
//! as a whole.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Reader;

use crate::decompression::{open_reader, Compression};
use crate::error::CorpusError;
use crate::types::DocumentRecord;

const ROOT: &[u8] = b"mediawiki";

/// Open a dump file, `-` meaning standard input.
///
/// Compression is guessed from the extension unless given. Fails before any
/// page is read if the file cannot be opened or is not a MediaWiki export.
pub fn open_dump(
    path: &Path,
    compression: Option<Compression>,
) -> Result<DumpReader<Box<dyn BufRead + Send>>, CorpusError> {
    let compression = compression.unwrap_or_else(|| Compression::from_path(path));
    let source: Box<dyn Read + Send> = if path == Path::new("-") {
        Box::new(io::stdin())
    } else {
        let file = File::open(path).map_err(|source| CorpusError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Box::new(file)
    };
    tracing::info!(path = %path.display(), %compression, "opening dump");
    DumpReader::new(open_reader(source, compression))
}

/// Iterator over the pages of a dump.
///
/// Yields `Err` at most once; the iterator is finished afterwards.
pub struct DumpReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    skip_buf: Vec<u8>,
    finished: bool,
}

enum Step {
    Page,
    Skip(BytesEnd<'static>),
    Eof,
}

enum Field {
    Title,
    Namespace,
    Redirect(String, Option<BytesEnd<'static>>),
    Skip(BytesEnd<'static>),
}

impl<R: BufRead> DumpReader<R> {
    /// Consume everything up to and including the `<mediawiki>` start tag.
    pub fn new(source: R) -> Result<Self, CorpusError> {
        let mut dump = Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            skip_buf: Vec::new(),
            finished: false,
        };
        let empty_root = loop {
            dump.buf.clear();
            match dump.reader.read_event_into(&mut dump.buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == ROOT => break false,
                Ok(Event::Empty(e)) if e.local_name().as_ref() == ROOT => break true,
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    return Err(CorpusError::NotADump(format!(
                        "root element is <{}>",
                        element_name(&e)
                    )))
                }
                Ok(Event::Eof) => return Err(CorpusError::NotADump("no root element".into())),
                Ok(_) => {}
                Err(err) => return Err(xml_error(&dump.reader, err)),
            }
        };
        dump.finished = empty_root;
        Ok(dump)
    }

    fn next_page(&mut self) -> Result<Option<DocumentRecord>, CorpusError> {
        loop {
            self.buf.clear();
            let step = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"page" => Step::Page,
                Ok(Event::Start(e)) => Step::Skip(e.to_end().into_owned()),
                Ok(Event::Eof) => Step::Eof,
                Ok(_) => continue,
                Err(err) => return Err(xml_error(&self.reader, err)),
            };
            match step {
                Step::Page => return self.read_page().map(Some),
                Step::Skip(end) => self.skip(end)?,
                Step::Eof => return Ok(None),
            }
        }
    }

    fn read_page(&mut self) -> Result<DocumentRecord, CorpusError> {
        let mut doc = DocumentRecord::default();
        loop {
            self.buf.clear();
            let field = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"title" => Field::Title,
                    b"ns" => Field::Namespace,
                    b"redirect" => {
                        let target =
                            redirect_target(&e).map_err(|err| xml_error(&self.reader, err))?;
                        Field::Redirect(target, Some(e.to_end().into_owned()))
                    }
                    _ => Field::Skip(e.to_end().into_owned()),
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"redirect" => {
                    let target =
                        redirect_target(&e).map_err(|err| xml_error(&self.reader, err))?;
                    Field::Redirect(target, None)
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"page" => return Ok(doc),
                Ok(Event::Eof) => {
                    return Err(CorpusError::Malformed("dump ends inside <page>".into()))
                }
                Ok(_) => continue,
                Err(err) => return Err(xml_error(&self.reader, err)),
            };
            match field {
                Field::Title => doc.title = self.read_text()?,
                Field::Namespace => {
                    let text = self.read_text()?;
                    doc.namespace = text.trim().parse().map_err(|_| {
                        CorpusError::Malformed(format!("namespace '{text}' is not an integer"))
                    })?;
                }
                Field::Redirect(target, end) => {
                    doc.redirect_title = target;
                    if let Some(end) = end {
                        self.skip(end)?;
                    }
                }
                Field::Skip(end) => self.skip(end)?,
            }
        }
    }

    /// Text content of the element whose start tag was just read.
    fn read_text(&mut self) -> Result<String, CorpusError> {
        let mut text = String::new();
        loop {
            self.buf.clear();
            let nested = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Text(e)) => {
                    let unescaped = e.unescape().map_err(|err| xml_error(&self.reader, err))?;
                    text.push_str(&unescaped);
                    continue;
                }
                Ok(Event::CData(e)) => {
                    text.push_str(&String::from_utf8_lossy(&e));
                    continue;
                }
                Ok(Event::Start(e)) => e.to_end().into_owned(),
                Ok(Event::End(_)) => return Ok(text),
                Ok(Event::Eof) => {
                    return Err(CorpusError::Malformed(
                        "dump ends inside a text element".into(),
                    ))
                }
                Ok(_) => continue,
                Err(err) => return Err(xml_error(&self.reader, err)),
            };
            self.skip(nested)?;
        }
    }

    fn skip(&mut self, end: BytesEnd<'static>) -> Result<(), CorpusError> {
        self.skip_buf.clear();
        match self.reader.read_to_end_into(end.name(), &mut self.skip_buf) {
            Ok(_) => Ok(()),
            Err(err) => Err(xml_error(&self.reader, err)),
        }
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<DocumentRecord, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_page() {
            Ok(Some(doc)) => Some(Ok(doc)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

fn redirect_target(e: &BytesStart<'_>) -> Result<String, quick_xml::Error> {
    let Some(attr) = e.try_get_attribute("title")? else {
        return Ok(String::new());
    };
    // Attribute unescaping only fails on bad entities; keep the raw text then.
    Ok(attr
        .unescape_value()
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned()))
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn xml_error<R>(reader: &Reader<R>, source: quick_xml::Error) -> CorpusError {
    match source {
        quick_xml::Error::Io(err) => CorpusError::Io(io::Error::new(err.kind(), err.to_string())),
        source => CorpusError::Xml {
            position: reader.buffer_position(),
            source,
        },
    }
}
