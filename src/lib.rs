/*!
# wikt2dict

Compiles wiktextract-style dictionary dumps (one JSON entry per headword and
part of speech) into two artifacts:

- a **lemma dictionary**: word → part of speech → pronunciations and
  structured senses;
- a **deinflection table**: inflected surface form → lemma → part of speech →
  grammatical labels.

The compiler is a one-shot, single-threaded batch pipeline: it streams the
dump once, classifies every gloss as a definition or an inflection reference
using per-language rules ([lang]), and reconciles three sources of form data
(explicit `form_of` links, classified glosses, raw morphological tables)
under a fixed additive precedence.

This crate can be used as a command line tool or as a lib to embed dictionary
compilation into other projects.
!*/
pub mod error;
pub mod lang;
pub mod pipelines;
pub mod sources;
