use std::io::{Cursor, Write};

/// A `<page>` header for building test dumps.
#[allow(dead_code)]
pub struct Page<'a> {
    pub title: &'a str,
    pub ns: i64,
    pub redirect: Option<&'a str>,
}

#[allow(dead_code)]
pub fn article(title: &str) -> Page<'_> {
    Page {
        title,
        ns: 0,
        redirect: None,
    }
}

#[allow(dead_code)]
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build a MediaWiki export with a siteinfo block and one revision per page.
#[allow(dead_code)]
pub fn make_dump(pages: &[Page<'_>]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <mediawiki xmlns=\"http://www.mediawiki.org/xml/export-0.10/\" version=\"0.10\" xml:lang=\"en\">\n\
         <siteinfo>\n<sitename>Wikipedia</sitename>\n<namespaces>\n\
         <namespace key=\"0\" case=\"first-letter\" />\n\
         <namespace key=\"1\" case=\"first-letter\">Talk</namespace>\n\
         </namespaces>\n</siteinfo>\n",
    );
    for (id, page) in pages.iter().enumerate() {
        xml.push_str("<page>\n");
        xml.push_str(&format!("<title>{}</title>\n", escape(page.title)));
        xml.push_str(&format!("<ns>{}</ns>\n<id>{}</id>\n", page.ns, id + 1));
        if let Some(target) = page.redirect {
            xml.push_str(&format!("<redirect title=\"{}\" />\n", escape(target)));
        }
        xml.push_str(&format!(
            "<revision>\n<id>{}</id>\n<contributor><username>Someone</username><id>7</id></contributor>\n\
             <text bytes=\"23\" xml:space=\"preserve\">'''{}''' is a &lt;thing&gt;.</text>\n\
             </revision>\n",
            1000 + id,
            escape(page.title)
        ));
        xml.push_str("</page>\n");
    }
    xml.push_str("</mediawiki>\n");
    xml
}

#[allow(dead_code)]
pub fn xz_compress(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    lzma_rs::xz_compress(&mut Cursor::new(data), &mut compressed).unwrap();
    compressed
}

#[allow(dead_code)]
pub fn bz2_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
