//! End-to-end build tests over a realistic content tree.

use marginalia::build::{BuildPaths, build};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Lay down a small but complete site: config, about page, static assets,
/// a three-chapter series, a single-section post, a legacy flat post, and
/// a draft that must never surface.
fn setup_site(root: &Path) -> BuildPaths {
    let content = root.join("content");
    let posts = content.join("posts");
    let static_dir = root.join("static");

    fs::create_dir_all(&posts).unwrap();
    fs::create_dir_all(&static_dir).unwrap();

    fs::write(
        content.join("site.json"),
        json!({
            "title": "Field Notes",
            "description": "Essays with margins",
            "base_url": "https://notes.example.com",
            "cname": "notes.example.com"
        })
        .to_string(),
    )
    .unwrap();

    fs::write(content.join("about.md"), "# About\n\nWritten in the margins.").unwrap();
    fs::write(static_dir.join("style.css"), "body { margin: 0 auto; }").unwrap();

    // three-chapter series, one chapter file-backed
    let series = posts.join("long-walk");
    fs::create_dir_all(&series).unwrap();
    fs::write(series.join("setting-out.md"), "We left at **dawn**.").unwrap();
    fs::write(
        series.join("post.json"),
        json!({
            "slug": "long-walk",
            "title": "The Long Walk",
            "date": "2024-03-10",
            "description": "A walk in three parts",
            "sections": [
                {"type": "markdown", "file": "setting-out.md", "title": "Setting Out"},
                {"type": "p", "text": "The middle was flat.", "title": "The Long Middle",
                 "left_margin_image": "/static/map.png", "left_margin_caption": "The route"},
                {"type": "p", "text": "And then we were home.", "title": "Homecoming"}
            ]
        })
        .to_string(),
    )
    .unwrap();

    // single-section folder post
    let single = posts.join("on-quiet");
    fs::create_dir_all(&single).unwrap();
    fs::write(
        single.join("post.json"),
        json!({
            "slug": "on-quiet",
            "title": "On Quiet",
            "date": "2024-06-01",
            "sections": [{"type": "p", "text": "Quiet is underrated."}]
        })
        .to_string(),
    )
    .unwrap();

    // legacy flat post
    fs::write(
        posts.join("first-post.json"),
        json!({
            "slug": "first-post",
            "title": "First Post",
            "date": "2019-11-02",
            "sections": [{"type": "html", "html": "<p>It begins.</p>"}]
        })
        .to_string(),
    )
    .unwrap();

    // draft: must appear nowhere
    let draft = posts.join("unfinished");
    fs::create_dir_all(&draft).unwrap();
    fs::write(
        draft.join("post.json"),
        json!({
            "slug": "unfinished",
            "title": "Unfinished Thought",
            "date": "2024-12-31",
            "draft": true,
            "sections": [{"type": "p", "text": "not ready"}]
        })
        .to_string(),
    )
    .unwrap();

    BuildPaths {
        content,
        static_dir,
        output: root.join("dist"),
    }
}

/// Snapshot the output tree as relative-path → file bytes.
fn snapshot(output: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(output)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(output).unwrap().to_path_buf(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

#[test]
fn full_build_produces_expected_tree() {
    let tmp = TempDir::new().unwrap();
    let paths = setup_site(tmp.path());
    let summary = build(&paths).unwrap();

    assert_eq!(summary.posts, 3);

    let out = &paths.output;
    assert!(out.join("index.html").exists());
    assert!(out.join("about.html").exists());
    assert!(out.join("feed.xml").exists());
    assert!(out.join("sitemap.xml").exists());
    assert!(out.join("static/style.css").exists());
    assert_eq!(
        fs::read_to_string(out.join("CNAME")).unwrap(),
        "notes.example.com\n"
    );

    // series: landing + 3 chapters with content-derived slugs
    assert!(out.join("posts/long-walk/index.html").exists());
    assert!(out.join("posts/long-walk/setting-out/index.html").exists());
    assert!(out.join("posts/long-walk/the-long-middle/index.html").exists());
    assert!(out.join("posts/long-walk/homecoming/index.html").exists());

    // single-section folder post: landing + 1 chapter
    assert!(out.join("posts/on-quiet/index.html").exists());
    assert!(out.join("posts/on-quiet/section-1/index.html").exists());

    // legacy post: landing only
    assert!(out.join("posts/first-post/index.html").exists());
    let legacy_entries: Vec<_> = fs::read_dir(out.join("posts/first-post"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(legacy_entries, vec!["index.html"]);
}

#[test]
fn series_pages_link_in_reading_order() {
    let tmp = TempDir::new().unwrap();
    let paths = setup_site(tmp.path());
    build(&paths).unwrap();

    let base = paths.output.join("posts/long-walk");

    let landing = fs::read_to_string(base.join("index.html")).unwrap();
    assert!(landing.contains(r#"href="setting-out/""#));
    assert!(landing.contains(r#"href="the-long-middle/""#));
    assert!(landing.contains(r#"href="homecoming/""#));
    assert!(landing.contains("<strong>dawn</strong>"));

    let first = fs::read_to_string(base.join("setting-out/index.html")).unwrap();
    assert!(!first.contains("chapter-prev"));
    assert!(first.contains(r#"href="../the-long-middle/""#));

    let middle = fs::read_to_string(base.join("the-long-middle/index.html")).unwrap();
    assert!(middle.contains(r#"href="../setting-out/""#));
    assert!(middle.contains(r#"href="../homecoming/""#));
    assert!(middle.contains("The route")); // margin caption survives to the page

    let last = fs::read_to_string(base.join("homecoming/index.html")).unwrap();
    assert!(last.contains(r#"href="../the-long-middle/""#));
    assert!(!last.contains("chapter-next"));
}

#[test]
fn index_feed_and_sitemap_agree_on_posts() {
    let tmp = TempDir::new().unwrap();
    let paths = setup_site(tmp.path());
    build(&paths).unwrap();

    let index = fs::read_to_string(paths.output.join("index.html")).unwrap();
    let feed = fs::read_to_string(paths.output.join("feed.xml")).unwrap();
    let sitemap = fs::read_to_string(paths.output.join("sitemap.xml")).unwrap();

    for slug in ["on-quiet", "long-walk", "first-post"] {
        assert!(index.contains(&format!("/posts/{slug}/")), "index missing {slug}");
        assert!(feed.contains(&format!("/posts/{slug}/")), "feed missing {slug}");
        assert!(sitemap.contains(&format!("/posts/{slug}/")), "sitemap missing {slug}");
    }

    // newest first on the index: on-quiet (2024-06) before long-walk (2024-03)
    let quiet_pos = index.find("/posts/on-quiet/").unwrap();
    let walk_pos = index.find("/posts/long-walk/").unwrap();
    let first_pos = index.find("/posts/first-post/").unwrap();
    assert!(quiet_pos < walk_pos);
    assert!(walk_pos < first_pos);
}

#[test]
fn drafts_appear_nowhere() {
    let tmp = TempDir::new().unwrap();
    let paths = setup_site(tmp.path());
    build(&paths).unwrap();

    assert!(!paths.output.join("posts/unfinished").exists());
    for page in ["index.html", "feed.xml", "sitemap.xml"] {
        let text = fs::read_to_string(paths.output.join(page)).unwrap();
        assert!(!text.contains("unfinished"), "{page} leaks the draft");
        assert!(!text.contains("Unfinished Thought"), "{page} leaks the draft");
    }
}

#[test]
fn rebuild_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let paths = setup_site(tmp.path());

    build(&paths).unwrap();
    let first = snapshot(&paths.output);

    build(&paths).unwrap();
    let second = snapshot(&paths.output);

    assert_eq!(first.len(), second.len());
    for (path, bytes) in &first {
        assert_eq!(
            Some(bytes),
            second.get(path),
            "{} differs between builds",
            path.display()
        );
    }
}
