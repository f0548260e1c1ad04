//! Wiktextract (kaikki.org) dump reader.
//!
//! Dumps are newline-delimited JSON, one entry per headword and part of
//! speech, optionally gzip-compressed. [KaikkiReader] streams entries and
//! surfaces malformed lines as per-item errors so that a single bad line
//! never aborts a run.
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::Deserialize;

use crate::error::Error;

/// One line of a wiktextract dump. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    pub word: Option<String>,
    pub pos: Option<String>,
    #[serde(default)]
    pub senses: Vec<RawSense>,
    #[serde(default)]
    pub sounds: Vec<Sound>,
    #[serde(default)]
    pub forms: Vec<FormEntry>,
}

impl RawEntry {
    /// Entries missing the headword, part of speech or senses carry nothing
    /// usable and are discarded upstream.
    pub fn is_usable(&self) -> bool {
        self.word.as_deref().map_or(false, |w| !w.is_empty())
            && self.pos.as_deref().map_or(false, |p| !p.is_empty())
            && !self.senses.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSense {
    #[serde(default)]
    pub glosses: Vec<String>,
    #[serde(default)]
    pub raw_glosses: Vec<String>,
    pub raw_gloss: Option<String>,
    #[serde(default)]
    pub form_of: Vec<FormOf>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RawSense {
    /// Outline levels of this sense, outermost first.
    ///
    /// `raw_glosses` keeps the outline levels that the plain `glosses` field
    /// flattens away, so it wins when present.
    pub fn gloss_levels(&self) -> Vec<String> {
        if !self.raw_glosses.is_empty() {
            self.raw_glosses.clone()
        } else if let Some(gloss) = &self.raw_gloss {
            vec![gloss.clone()]
        } else {
            self.glosses.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormOf {
    pub word: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sound {
    pub ipa: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormEntry {
    pub form: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Streaming reader over a dump.
///
/// Iteration yields one `Result<RawEntry, Error>` per non-empty line;
/// [KaikkiReader::line_count] counts every line read, including empty and
/// malformed ones.
pub struct KaikkiReader<R: BufRead> {
    lines: Lines<R>,
    line_count: usize,
}

impl KaikkiReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl KaikkiReader<BufReader<MultiGzDecoder<File>>> {
    pub fn from_path_gzip<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(MultiGzDecoder::new(file))))
    }
}

impl<R: BufRead> KaikkiReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_count: 0,
        }
    }

    /// Lines read so far.
    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

impl<R: BufRead> Iterator for KaikkiReader<R> {
    type Item = Result<RawEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.line_count += 1;
                    return Some(Err(e.into()));
                }
            };
            self.line_count += 1;
            if line.is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(Error::from));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_entries_and_counts_lines() {
        let input = "\
{\"word\":\"run\",\"pos\":\"verb\",\"senses\":[{\"glosses\":[\"to move quickly\"]}]}\n\
\n\
{not json\n\
{\"word\":\"cat\",\"pos\":\"noun\",\"senses\":[{\"glosses\":[\"a small feline\"]}]}\n";

        let mut reader = KaikkiReader::new(input.as_bytes());

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.word.as_deref(), Some("run"));
        assert!(first.is_usable());

        // the empty line is swallowed but still counted
        let malformed = reader.next().unwrap();
        assert!(malformed.is_err());
        assert_eq!(reader.line_count(), 3);

        let last = reader.next().unwrap().unwrap();
        assert_eq!(last.word.as_deref(), Some("cat"));

        assert!(reader.next().is_none());
        assert_eq!(reader.line_count(), 4);
    }

    #[test]
    fn unusable_entries_detected() {
        let entry: RawEntry = serde_json::from_str("{\"word\":\"run\",\"pos\":\"verb\"}").unwrap();
        assert!(!entry.is_usable());

        let entry: RawEntry =
            serde_json::from_str("{\"pos\":\"verb\",\"senses\":[{\"glosses\":[\"x\"]}]}").unwrap();
        assert!(!entry.is_usable());
    }

    #[test]
    fn raw_glosses_win_over_plain() {
        let sense: RawSense = serde_json::from_str(
            "{\"glosses\":[\"outer\",\"inner\"],\"raw_glosses\":[\"outer:\",\"inner.\"]}",
        )
        .unwrap();
        assert_eq!(sense.gloss_levels(), vec!["outer:", "inner."]);

        let sense: RawSense = serde_json::from_str("{\"raw_gloss\":\"only one\"}").unwrap();
        assert_eq!(sense.gloss_levels(), vec!["only one"]);

        let sense: RawSense = serde_json::from_str("{\"glosses\":[\"plain\"]}").unwrap();
        assert_eq!(sense.gloss_levels(), vec!["plain"]);
    }
}
