//! Lemma/form dictionary compilation pipeline.
//!
//! One streaming pass over the dump feeds four accumulators: the lemma
//! dictionary, the deinflection table, the explicit `form_of` backlog and the
//! automated (raw morphological table) form map. After the stream, two
//! reconciliation passes fold the backlog and the automated map into the
//! deinflection table. All passes are additive: nothing recorded earlier is
//! ever replaced.
//!
//! # Processing
//! 1. Each line is parsed into a [RawEntry]; malformed lines and entries
//!    without word/pos/senses are logged and skipped.
//! 1. Raw `forms` are collected into the automated map, minus blacklisted
//!    tag sets.
//! 1. Each sense is classified ([crate::lang::Classification]); definitions
//!    go to the lemma dictionary (flat glosses directly, multi-level glosses
//!    through the shared [GlossTree]), inflection references go through the
//!    language's extractor into the deinflection table.
//! 1. `form_of` senses are backlogged and resolved after the stream, then
//!    surface forms still absent from the table are gap-filled from the
//!    automated map when unambiguous enough.
use std::fs::File;
use std::io::{BufRead, BufWriter};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, error, info};
use serde::Serialize;

use crate::error::Error;
use crate::lang::{self, Classification, Deinflector};
use crate::pipelines::pipeline::Pipeline;
use crate::sources::kaikki::{KaikkiReader, RawEntry, RawSense};

use super::outline::GlossTree;
use super::types::{AutomatedForms, FormDict, Gloss, IpaInfo, LemmaDict, OutputSense};

/// Tag sets that describe table layout or headword variants rather than an
/// actual inflected form.
const BLACKLISTED_TAGS: [&str; 12] = [
    "inflection-template",
    "table-tags",
    "nominative",
    "canonical",
    "class",
    "error-unknown-tag",
    "error-unrecognized-form",
    "infinitive",
    "includes-article",
    "obsolete",
    "archaic",
    "used-in-the-form",
];

/// Marks labels that came from the automated map rather than a source gloss.
const AUTOMATED_PREFIX: &str = "-automated- ";

/// A surface form pointed at by this many distinct lemmas or more is too
/// ambiguous to gap-fill.
const MAX_AUTOMATED_LEMMAS: usize = 5;

/// Separator between a nested `form_of` gloss's outline label and its body.
const NESTED_LABEL_SEPARATOR: &str = "##";

const PROGRESS_INTVL: usize = 100_000;

/// Compiles a wiktextract dump into a lemma dictionary and a deinflection
/// table, written as `<src>-<tgt>-lemmas.json` and `<src>-<tgt>-forms.json`.
pub struct LemmaForms {
    src: PathBuf,
    dst: PathBuf,
    source_lang: String,
    target_lang: String,
}

impl LemmaForms {
    pub fn new(src: PathBuf, dst: PathBuf, source_lang: String, target_lang: String) -> Self {
        Self {
            src,
            dst,
            source_lang,
            target_lang,
        }
    }

    pub fn lemmas_path(&self) -> PathBuf {
        self.dst
            .join(format!("{}-{}-lemmas.json", self.source_lang, self.target_lang))
    }

    pub fn forms_path(&self) -> PathBuf {
        self.dst
            .join(format!("{}-{}-forms.json", self.source_lang, self.target_lang))
    }

    /// Stream the whole dump through a [Compiler] and reconcile.
    fn compile<R: BufRead>(
        &self,
        mut reader: KaikkiReader<R>,
    ) -> Result<(LemmaDict, FormDict), Error> {
        let mut compiler = Compiler::new(&self.target_lang);

        while let Some(item) = reader.next() {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    error!("skipping malformed line {}: {}", reader.line_count(), e);
                    continue;
                }
            };
            if !entry.is_usable() {
                debug!(
                    "skipping entry without word/pos/senses at line {}",
                    reader.line_count()
                );
                continue;
            }
            compiler.process_entry(entry)?;

            if reader.line_count() % PROGRESS_INTVL == 0 {
                info!("processed {} lines", reader.line_count());
            }
        }
        info!("processed {} lines", reader.line_count());

        compiler.reconcile();
        Ok(compiler.into_dicts())
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), value)?;
        Ok(())
    }
}

impl Pipeline<()> for LemmaForms {
    fn run(&self) -> Result<(), Error> {
        let gzipped = self.src.extension().map_or(false, |ext| ext == "gz");
        let (lemmas, forms) = if gzipped {
            self.compile(KaikkiReader::from_path_gzip(&self.src)?)?
        } else {
            self.compile(KaikkiReader::from_path(&self.src)?)?
        };

        std::fs::create_dir_all(&self.dst)?;

        let lemmas_path = self.lemmas_path();
        info!("writing lemma dictionary to {:?}", lemmas_path);
        Self::write_json(&lemmas_path, &lemmas)?;

        let forms_path = self.forms_path();
        info!("writing deinflection table to {:?}", forms_path);
        Self::write_json(&forms_path, &forms)?;

        Ok(())
    }
}

/// A backlogged `form_of` sense, resolved after the streaming pass.
#[derive(Debug, Clone)]
struct PendingForm {
    surface: String,
    pos: String,
    lemma: String,
    glosses: Vec<String>,
}

/// Owns all accumulation state for one run.
pub(crate) struct Compiler {
    rules: Option<&'static dyn Deinflector>,
    lemmas: LemmaDict,
    forms: FormDict,
    automated: AutomatedForms,
    pending: Vec<PendingForm>,
}

impl Compiler {
    pub(crate) fn new(target_lang: &str) -> Self {
        Self {
            rules: lang::for_target(target_lang),
            lemmas: LemmaDict::default(),
            forms: FormDict::default(),
            automated: AutomatedForms::default(),
            pending: Vec::new(),
        }
    }

    pub(crate) fn process_entry(&mut self, entry: RawEntry) -> Result<(), Error> {
        // is_usable() was checked by the caller
        let word = entry.word.clone().unwrap_or_default();
        let pos = entry.pos.clone().unwrap_or_default();

        self.collect_forms(&entry, &word, &pos);

        let ipa: Vec<IpaInfo> = entry
            .sounds
            .iter()
            .filter_map(|sound| {
                sound.ipa.as_ref().map(|ipa| IpaInfo {
                    ipa: ipa.clone(),
                    tags: sound.tags.clone(),
                })
            })
            .collect();

        let total = entry.senses.len();
        let mut tree = GlossTree::default();

        for (index, sense) in entry.senses.iter().enumerate() {
            let levels = sense.gloss_levels();
            if levels.is_empty() {
                continue;
            }

            if !sense.form_of.is_empty() {
                match sense.form_of[0].word.clone().filter(|w| !w.is_empty()) {
                    Some(lemma) => self.pending.push(PendingForm {
                        surface: word.clone(),
                        pos: pos.clone(),
                        lemma,
                        glosses: levels,
                    }),
                    None => debug!("form_of without lemma on '{}' ({})", word, pos),
                }
                continue;
            }

            let classification = match self.rules {
                Some(rules) => rules.classify(&levels),
                None => Classification::Definition,
            };
            match classification {
                Classification::Definition => {
                    let is_last = index + 1 == total;
                    self.record_definition(&word, &pos, &ipa, sense, &levels, &mut tree, is_last)?;
                }
                Classification::InflectionReference => {
                    if let Some(rules) = self.rules {
                        // extraction reads the plain glosses, not the outline levels
                        if let Some(deinflection) = rules.extract(&word, &sense.glosses) {
                            self.add_deinflections(
                                &word,
                                &pos,
                                &deinflection.lemma,
                                deinflection.labels,
                            );
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Append one definitional sense to the lemma dictionary.
    #[allow(clippy::too_many_arguments)]
    fn record_definition(
        &mut self,
        word: &str,
        pos: &str,
        ipa: &[IpaInfo],
        sense: &RawSense,
        levels: &[String],
        tree: &mut GlossTree,
        is_last: bool,
    ) -> Result<(), Error> {
        let info = self
            .lemmas
            .entry(word.to_string())
            .or_default()
            .entry(pos.to_string())
            .or_default();

        // unique by IPA string, first-seen tags win
        for candidate in ipa {
            if !info.ipa.iter().any(|existing| existing.ipa == candidate.ipa) {
                info.ipa.push(candidate.clone());
            }
        }

        let mut output = OutputSense {
            glosses: Vec::new(),
            tags: sense.tags.clone(),
        };

        if levels.len() > 1 {
            tree.insert(levels);
            if is_last && !tree.is_empty() {
                match tree.render() {
                    Ok(rendered) => output.glosses.extend(rendered),
                    Err(e) => {
                        error!("dropping nested senses of '{}' ({}): {}", word, pos, e);
                        tree.clear();
                        return Ok(());
                    }
                }
                tree.clear();
            }
        } else {
            // a flat gloss flushes any pending outline first
            if !tree.is_empty() {
                match tree.render() {
                    Ok(rendered) => output.glosses.extend(rendered),
                    Err(e) => {
                        error!("dropping nested senses of '{}' ({}): {}", word, pos, e);
                        tree.clear();
                        return Ok(());
                    }
                }
                tree.clear();
            }

            let gloss = &levels[0];
            // containment dedup against the serialized sense, not exact match
            let serialized = serde_json::to_string(&output.glosses)?;
            if !serialized.contains(gloss.as_str()) {
                output.glosses.push(Gloss::Text(gloss.clone()));
            }
        }

        if !output.glosses.is_empty() {
            info.senses.push(output);
        }
        Ok(())
    }

    /// Collect raw morphological table rows into the automated map.
    fn collect_forms(&mut self, entry: &RawEntry, word: &str, pos: &str) {
        for form_entry in &entry.forms {
            let (form, tags) = match (form_entry.form.as_deref(), form_entry.tags.as_deref()) {
                (Some(form), Some(tags)) => (form, tags),
                _ => continue,
            };
            if form.is_empty() || tags.is_empty() {
                continue;
            }
            if tags
                .iter()
                .any(|tag| BLACKLISTED_TAGS.contains(&tag.as_str()))
            {
                continue;
            }

            self.automated
                .entry(form.to_string())
                .or_default()
                .entry(word.to_string())
                .or_default()
                .entry(pos.to_string())
                .or_default()
                .push(tags.iter().join(" "));
        }
    }

    /// Merge labels into the deinflection table. Appends only; never
    /// deduplicates or replaces. Self-referential records are dropped here so
    /// the invariant holds even after surface normalization.
    fn add_deinflections(&mut self, surface: &str, pos: &str, lemma: &str, labels: Vec<String>) {
        let surface = match self.rules {
            Some(rules) => rules.normalize_surface(surface),
            None => surface.to_string(),
        };
        if surface == lemma {
            return;
        }
        self.forms
            .entry(surface)
            .or_default()
            .entry(lemma.to_string())
            .or_default()
            .entry(pos.to_string())
            .or_default()
            .extend(labels);
    }

    /// Post-stream reconciliation: explicit `form_of` links first, then the
    /// automated gap-fill. Order matters; both passes only append.
    pub(crate) fn reconcile(&mut self) {
        self.resolve_explicit_forms();
        self.fill_automated_forms();
    }

    fn resolve_explicit_forms(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for form in pending {
            if form.surface == form.lemma || form.glosses.is_empty() {
                continue;
            }
            let label = if !form.glosses[0].contains(NESTED_LABEL_SEPARATOR) {
                form.glosses[0].clone()
            } else if form.glosses.len() > 1 {
                form.glosses[1].clone()
            } else {
                continue;
            };
            self.add_deinflections(&form.surface, &form.pos, &form.lemma, vec![label]);
        }
    }

    /// Gap-fill surface forms the explicit and classified passes missed, as
    /// long as the form is not too ambiguous.
    fn fill_automated_forms(&mut self) {
        let automated = std::mem::take(&mut self.automated);
        let mut filled = 0usize;

        for (form, lemmas) in automated {
            if self.forms.contains_key(&form) {
                continue;
            }
            if lemmas.len() >= MAX_AUTOMATED_LEMMAS {
                debug!(
                    "not gap-filling '{}': {} candidate lemmas",
                    form,
                    lemmas.len()
                );
                continue;
            }
            filled += 1;
            for (lemma, poses) in lemmas {
                if form == lemma {
                    continue;
                }
                for (pos, tag_strings) in poses {
                    let labels = tag_strings
                        .into_iter()
                        .map(|tags| format!("{AUTOMATED_PREFIX}{tags}"))
                        .collect();
                    self.add_deinflections(&form, &pos, &lemma, labels);
                }
            }
        }
        info!("gap-filled {} missing forms from morphological tables", filled);
    }

    /// Final dictionaries. Lemma entries without a single non-empty sense are
    /// pruned.
    pub(crate) fn into_dicts(mut self) -> (LemmaDict, FormDict) {
        self.lemmas.retain(|_, entries| {
            entries.retain(|_, info| !info.senses.is_empty());
            !entries.is_empty()
        });
        (self.lemmas, self.forms)
    }
}
