//! [`BuildTool`] backed by the Xcode command-line tools.
//!
//! ```text
//! workspace:  xcodebuild -workspace <ws> -scheme <name> -sdk <sdk>
//!                        -configuration Debug -derivedDataPath <build>/DerivedData/<name> build
//! page:       xcrun --sdk <sdk> swiftc -typecheck -target <triple>
//!                   -F <products> -I <products> <build>/pages/<ws>/<playground>/<page>.swift
//! clean:      rm -r <build>
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use playdeck_core::{BuildError, BuildTool, Config, PageBuild, Platform, Toolchain, WorkspacePath};

use crate::error::{io_err, CompileError};

/// Lines of stdout kept in the error when a tool fails without stderr output.
const STDOUT_TAIL: usize = 20;

pub struct XcodeBuildTool {
    toolchain: Toolchain,
    build_dir: PathBuf,
}

impl XcodeBuildTool {
    pub fn new(toolchain: Toolchain, build_dir: impl Into<PathBuf>) -> Self {
        XcodeBuildTool {
            toolchain,
            build_dir: build_dir.into(),
        }
    }

    /// Toolchain and build directory from `config`, resolved against `project`.
    pub fn from_config(config: &Config, project: &Path) -> Self {
        Self::new(config.toolchain.clone(), config.build_dir_for(project))
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Remove the build directory with everything built into it. Returns
    /// `false` when there was nothing to remove.
    pub fn clean(&self) -> Result<bool, CompileError> {
        if !self.build_dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&self.build_dir).map_err(|e| io_err(&self.build_dir, e))?;
        info!("removed {}", self.build_dir.display());
        Ok(true)
    }

    pub fn derived_data(&self, workspace: &WorkspacePath) -> PathBuf {
        self.build_dir.join("DerivedData").join(workspace.name())
    }

    /// Where `xcodebuild` leaves the workspace's frameworks and modules.
    pub fn products_dir(&self, workspace: &WorkspacePath, platform: Platform) -> PathBuf {
        self.derived_data(workspace)
            .join("Build")
            .join("Products")
            .join(format!("Debug{}", platform.products_suffix()))
    }

    pub fn workspace_args(&self, workspace: &WorkspacePath, platform: Platform) -> Vec<OsString> {
        vec![
            "-workspace".into(),
            workspace.path().into(),
            "-scheme".into(),
            workspace.name().into(),
            "-sdk".into(),
            platform.sdk().into(),
            "-configuration".into(),
            "Debug".into(),
            "-derivedDataPath".into(),
            self.derived_data(workspace).into(),
            "build".into(),
        ]
    }

    /// File the rendered page is written to before type-checking.
    pub fn page_source(&self, build: &PageBuild<'_>) -> PathBuf {
        self.build_dir
            .join("pages")
            .join(build.workspace.name())
            .join(build.playground.name())
            .join(format!("{}.swift", build.page_name))
    }

    pub fn page_args(&self, build: &PageBuild<'_>, source: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--sdk".into(),
            build.platform.sdk().into(),
            "swiftc".into(),
            "-typecheck".into(),
            "-target".into(),
            target_triple(build.platform).into(),
        ];
        for dir in build.artifacts {
            args.extend([OsString::from("-F"), dir.into(), OsString::from("-I"), dir.into()]);
        }
        args.push(source.into());
        args
    }
}

impl BuildTool for XcodeBuildTool {
    fn compile_workspace(
        &self,
        workspace: &WorkspacePath,
        platform: Platform,
        cached: bool,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let products = self.products_dir(workspace, platform);
        if cached && products.is_dir() {
            debug!("reusing products in {}", products.display());
            return Ok(vec![products]);
        }
        run(
            &self.toolchain.xcodebuild,
            &self.workspace_args(workspace, platform),
        )?;
        Ok(vec![products])
    }

    fn compile_page(&self, build: &PageBuild<'_>) -> Result<(), BuildError> {
        let source = self.page_source(build);
        if let Some(parent) = source.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&source, build.rendered).map_err(|e| BuildError::Io {
            path: source.clone(),
            source: e,
        })?;
        run(&self.toolchain.xcrun, &self.page_args(build, &source))
    }
}

/// `<arch>-apple-<os>` triple for the host architecture.
fn target_triple(platform: Platform) -> String {
    let arch = match std::env::consts::ARCH {
        "aarch64" => "arm64",
        other => other,
    };
    match platform {
        Platform::Ios => format!("{arch}-apple-ios13.0-simulator"),
        Platform::Macos => format!("{arch}-apple-macosx10.15"),
        Platform::Tvos => format!("{arch}-apple-tvos13.0-simulator"),
    }
}

fn command_line(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` to completion; a nonzero exit is [`BuildError::Failed`].
fn run(program: &Path, args: &[OsString]) -> Result<(), BuildError> {
    let command = command_line(program, args);
    info!("running {command}");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| BuildError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }
    let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if stderr.trim().is_empty() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = stdout.lines().collect();
        stderr = lines[lines.len().saturating_sub(STDOUT_TAIL)..].join("\n");
    }
    Err(BuildError::Failed {
        command,
        status: output.status.to_string(),
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use playdeck_core::PlaygroundPath;

    fn tool() -> XcodeBuildTool {
        XcodeBuildTool::new(Toolchain::default(), "/code/app/.playdeck")
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn workspace_args_target_platform_sdk() {
        let ws = WorkspacePath(PathBuf::from("/code/app/App.xcworkspace"));
        let args = strings(&tool().workspace_args(&ws, Platform::Macos));
        assert_eq!(
            args,
            vec![
                "-workspace",
                "/code/app/App.xcworkspace",
                "-scheme",
                "App",
                "-sdk",
                "macosx",
                "-configuration",
                "Debug",
                "-derivedDataPath",
                "/code/app/.playdeck/DerivedData/App",
                "build",
            ]
        );
    }

    #[test]
    fn products_dir_depends_on_platform() {
        let ws = WorkspacePath(PathBuf::from("/code/app/App.xcworkspace"));
        assert_eq!(
            tool().products_dir(&ws, Platform::Ios),
            PathBuf::from("/code/app/.playdeck/DerivedData/App/Build/Products/Debug-iphonesimulator")
        );
        assert_eq!(
            tool().products_dir(&ws, Platform::Macos),
            PathBuf::from("/code/app/.playdeck/DerivedData/App/Build/Products/Debug")
        );
    }

    #[test]
    fn page_args_link_against_artifacts() {
        let ws = WorkspacePath(PathBuf::from("/code/app/App.xcworkspace"));
        let pg = PlaygroundPath(PathBuf::from("/code/app/Docs.playground"));
        let artifacts = vec![PathBuf::from("/products")];
        let build = PageBuild {
            rendered: "let a = 1\n",
            page_name: "Intro",
            playground: &pg,
            workspace: &ws,
            platform: Platform::Ios,
            artifacts: &artifacts,
        };
        let t = tool();
        let source = t.page_source(&build);
        assert_eq!(
            source,
            PathBuf::from("/code/app/.playdeck/pages/App/Docs/Intro.swift")
        );
        let args = strings(&t.page_args(&build, &source));
        assert_eq!(&args[..4], &["--sdk", "iphonesimulator", "swiftc", "-typecheck"]);
        assert!(args[5].ends_with("-apple-ios13.0-simulator"));
        assert_eq!(&args[6..10], &["-F", "/products", "-I", "/products"]);
        assert_eq!(args.last().unwrap(), "/code/app/.playdeck/pages/App/Docs/Intro.swift");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run(Path::new("/definitely/not/a/tool"), &[]).unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }), "got: {err}");
    }

    #[test]
    #[cfg(unix)]
    fn nonzero_exit_is_failure_with_stderr() {
        let args: Vec<OsString> = vec!["-c".into(), "echo boom >&2; exit 3".into()];
        let err = run(Path::new("sh"), &args).unwrap_err();
        match err {
            BuildError::Failed { stderr, status, .. } => {
                assert_eq!(stderr.trim(), "boom");
                assert!(status.contains('3'));
            }
            other => panic!("expected Failed, got {other}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn stdout_tail_stands_in_for_empty_stderr() {
        let args: Vec<OsString> = vec!["-c".into(), "echo '** BUILD FAILED **'; exit 65".into()];
        let err = run(Path::new("sh"), &args).unwrap_err();
        assert!(err.to_string().contains("** BUILD FAILED **"), "got: {err}");
    }

    #[test]
    fn cached_build_reuses_existing_products() {
        let dir = tempfile::TempDir::new().unwrap();
        let t = XcodeBuildTool::new(
            Toolchain {
                xcodebuild: PathBuf::from("/definitely/not/xcodebuild"),
                xcrun: PathBuf::from("/definitely/not/xcrun"),
            },
            dir.path(),
        );
        let ws = WorkspacePath(PathBuf::from("/code/app/App.xcworkspace"));
        std::fs::create_dir_all(t.products_dir(&ws, Platform::Macos)).unwrap();

        let artifacts = t.compile_workspace(&ws, Platform::Macos, true).expect("cached");
        assert_eq!(artifacts, vec![t.products_dir(&ws, Platform::Macos)]);

        let err = t.compile_workspace(&ws, Platform::Macos, false).unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }

    #[test]
    fn clean_removes_build_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let t = XcodeBuildTool::new(Toolchain::default(), dir.path().join(".playdeck"));
        let ws = WorkspacePath(PathBuf::from("/code/app/App.xcworkspace"));
        std::fs::create_dir_all(t.products_dir(&ws, Platform::Ios)).unwrap();

        assert!(t.clean().expect("clean"));
        assert!(!t.build_dir().exists());
        assert!(!t.clean().expect("nothing left"), "second clean has nothing to do");
    }
}
