//! # Marginalia
//!
//! A minimal static site generator for essay-style blogs. Content lives in
//! JSON post manifests referencing Markdown fragments; the build renders
//! everything into a deployable directory of plain HTML, an RSS feed, and
//! a sitemap.
//!
//! # Architecture: Normalize, Then Emit
//!
//! The build is a two-phase batch transform:
//!
//! ```text
//! 1. Load    content/posts/  →  Vec<Post>   (manifests + Markdown → uniform records)
//! 2. Emit    Vec<Post>       →  dist/       (pages, feed, sitemap, static copy)
//! ```
//!
//! Everything interesting happens in phase 1: sections declared in a
//! manifest come in several evolving shapes (Markdown files, collapsible
//! expanders, plain paragraphs, margin notes and images), and the loader
//! normalizes each one into a uniform pre-rendered record. Phase 2 emitters
//! never look at raw content; they all consume the same normalized posts,
//! which is what keeps the index, the feed, and the sitemap agreeing on
//! what exists.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`slug`] | URL slug normalization for chapter paths |
//! | [`markdown`] | Markdown → HTML via pulldown-cmark, with an explicit extension set |
//! | [`config`] | `site.json` loading with stock defaults |
//! | [`section`] | Section normalization: rendered forms + preserved-field merge |
//! | [`load`] | Post discovery (folder + legacy layouts), draft filtering, ordering |
//! | [`types`] | Shared `Post`/`ChapterLink` records and chapter navigation |
//! | [`render`] | Maud page templates: index, landing, chapter, about |
//! | [`feed`] | RSS 2.0 feed |
//! | [`sitemap`] | sitemap.xml |
//! | [`build`] | Orchestration: clean, copy static, drive every emitter |
//!
//! # Design Decisions
//!
//! ## Open Section Schema With a Preserved-Field Contract
//!
//! Sections are open JSON records, not a closed struct. The normalizer
//! understands a handful of `type` tags and passes everything else through
//! untouched; the fields it carries forward across rewrites are pinned in
//! [`section::PRESERVED_FIELDS`]. That constant is the contract between
//! content and templates: new per-section fields (a new margin widget, say)
//! reach the templates by growing the list, without touching the
//! normalization branches.
//!
//! ## Content-Derived Chapter URLs
//!
//! A multi-section post becomes a landing page plus one page per chapter.
//! Chapter URLs use slugs derived from section titles (or declared
//! `section_slug` overrides), not positions, so inserting or reordering
//! chapters does not silently move the permalinks of untouched ones.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template variables
//! are Rust expressions, interpolation is XSS-escaped by default, and there
//! is no runtime template directory to ship or get out of sync.
//!
//! ## All-or-Nothing Builds
//!
//! The output directory is deleted and rebuilt on every run. There is no
//! incremental mode and no partial-failure mode: a malformed manifest or a
//! dangling Markdown reference aborts the whole build with the offending
//! path. Given unchanged inputs, two runs produce byte-identical trees.

pub mod build;
pub mod config;
pub mod feed;
pub mod load;
pub mod markdown;
pub mod render;
pub mod section;
pub mod sitemap;
pub mod slug;
pub mod types;
