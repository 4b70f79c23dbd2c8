//! Render Engine tests against on-disk playground fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use playdeck_core::{PlaygroundPath, Platform};
use playdeck_discovery::LocalFileSystem;
use playdeck_renderer::{Node, RenderEnvironment, RenderError, RenderTarget, Renderer, SyntaxError};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write fixture");
}

/// One workspace referencing `Docs.playground`, whose pages are `(name, source)`.
fn project(dir: &Path, platform: &str, pages: &[(&str, &str)]) -> PathBuf {
    write(&dir.join("App.xcodeproj/project.pbxproj"), "");
    write(
        &dir.join("App.xcworkspace/contents.xcworkspacedata"),
        "<Workspace version = \"1.0\">\n<FileRef location = \"group:Docs.playground\"></FileRef>\n</Workspace>\n",
    );
    let pg = dir.join("Docs.playground");
    let listed: String = pages
        .iter()
        .map(|(name, _)| format!("<page name='{name}'/>\n"))
        .collect();
    write(
        &pg.join("contents.xcplayground"),
        &format!("<playground version='6.0' target-platform='{platform}'>\n<pages>\n{listed}</pages>\n</playground>\n"),
    );
    for (name, source) in pages {
        write(
            &pg.join(format!("Pages/{name}.xcplaygroundpage/Contents.swift")),
            source,
        );
    }
    pg
}

fn renderer() -> Renderer {
    Renderer::new().expect("embedded templates")
}

// ---------------------------------------------------------------------------
// render_page / render_playground
// ---------------------------------------------------------------------------

#[test]
fn render_page_reads_only_contents_swift() {
    let dir = TempDir::new().unwrap();
    let pg = PlaygroundPath(project(dir.path(), "ios", &[("Intro", "let a = 1\n")]));
    let page = pg.page("Intro");
    // Sibling files of the page must not leak into the output.
    write(&page.path().join("Resources/notes.swift"), "let secret = 2\n");

    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Compile);
    let out = env.render_page(&pg, &page, Platform::Ios).expect("render");
    assert_eq!(out.rendered, "let a = 1\n");
    assert_eq!(out.page, page);
    assert_eq!(out.ast, vec![Node::Code { text: "let a = 1\n".into() }]);
}

#[test]
fn render_page_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let src = "//: # Title\nlet a = 1\n// nef:begin:hidden\nimport X\n// nef:end\n";
    let pg = PlaygroundPath(project(dir.path(), "ios", &[("Intro", src)]));
    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Markdown);
    let first = env.render_page(&pg, &pg.page("Intro"), Platform::Ios).unwrap();
    let second = env.render_page(&pg, &pg.page("Intro"), Platform::Ios).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case("macos", Platform::Macos)]
#[case("tvos", Platform::Tvos)]
#[case("ios", Platform::Ios)]
fn playground_pages_carry_descriptor_platform(#[case] raw: &str, #[case] expected: Platform) {
    let dir = TempDir::new().unwrap();
    let pg = PlaygroundPath(project(dir.path(), raw, &[("A", "let a = 1\n"), ("B", "let b = 2\n")]));
    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Compile);
    let out = env.render_playground(&pg).expect("render");
    assert_eq!(out.platform(), expected);
    assert!(out.pages.iter().all(|p| p.platform == expected));
}

#[test]
fn playground_pages_keep_descriptor_order() {
    let dir = TempDir::new().unwrap();
    let pages: Vec<(String, String)> = (0..12)
        .map(|i| (format!("Page{i:02}"), format!("let v{i} = {i}\n")))
        .collect();
    let refs: Vec<(&str, &str)> = pages.iter().map(|(n, s)| (n.as_str(), s.as_str())).collect();
    let pg = PlaygroundPath(project(dir.path(), "ios", &refs));

    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Compile);
    let out = env.render_playground(&pg).expect("render");
    let titles: Vec<_> = out.pages.iter().map(|p| p.page.title()).collect();
    let expected: Vec<_> = pages.iter().map(|(n, _)| n.clone()).collect();
    assert_eq!(titles, expected);
}

#[test]
fn one_bad_page_fails_the_playground() {
    let dir = TempDir::new().unwrap();
    let pg = PlaygroundPath(project(
        dir.path(),
        "ios",
        &[("Good", "let a = 1\n"), ("Bad", "// nef:begin:hidden\nlet b = 2\n")],
    ));
    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Compile);
    let err = env.render_playground(&pg).unwrap_err();
    match err {
        RenderError::Syntax { page, source } => {
            assert!(page.ends_with("Bad.xcplaygroundpage"));
            assert_eq!(source, SyntaxError::UnclosedRegion { line: 1 });
        }
        other => panic!("expected Syntax, got {other}"),
    }
}

#[test]
fn missing_contents_swift_is_io_error() {
    let dir = TempDir::new().unwrap();
    let pg = PlaygroundPath(project(dir.path(), "ios", &[("A", "let a = 1\n")]));
    fs::remove_file(pg.page("A").source()).unwrap();
    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Compile);
    let err = env.render_playground(&pg).unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }), "got: {err}");
    assert!(err.page().unwrap().ends_with("Contents.swift"));
}

// ---------------------------------------------------------------------------
// render_playgrounds
// ---------------------------------------------------------------------------

#[test]
fn render_playgrounds_covers_the_project() {
    let dir = TempDir::new().unwrap();
    project(dir.path(), "macos", &[("One", "//: One\n"), ("Two", "//: Two\n")]);
    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::jekyll());
    let out = env.render_playgrounds(dir.path()).expect("render");
    assert_eq!(out.len(), 1);
    let pg = out.head();
    assert_eq!(pg.playground.name(), "Docs");
    assert!(pg.pages.head().rendered.contains("permalink: /docs/docs/one/"));
}

#[test]
fn render_playgrounds_surfaces_discovery_failure() {
    let dir = TempDir::new().unwrap();
    let r = renderer();
    let env = RenderEnvironment::new(&LocalFileSystem, &r, RenderTarget::Markdown);
    let err = env.render_playgrounds(dir.path()).unwrap_err();
    assert!(matches!(err, RenderError::Discovery(_)), "got: {err}");
    assert!(err.to_string().contains("not found any valid workspace"));
}
