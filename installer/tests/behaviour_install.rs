//! Behaviour-driven tests for theme installation.
//!
//! These scenarios drive [`Installer`] against a real project tree. Archives
//! are unpacked with the system `tar`; `rake` and `rails` are answered by
//! [`RailsTools`] so no Rails toolchain is needed.

use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use flate2::write::GzEncoder;
use railsthemes_installer::error::{InstallerError, Result as InstallerResult};
use railsthemes_installer::exec::{CommandExecutor, SystemCommandExecutor};
use railsthemes_installer::install::{InstallOutcome, Installer};
use railsthemes_installer::repair::{ACTIVE_ROOT_ROUTE, PLACEHOLDER_INDEX, ROUTES_FILE};
use railsthemes_installer::source::InstallRequest;
use railsthemes_installer::test_utils::{stdout_output, success_output};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};
use std::fs;
use std::process::Output;
use tempfile::TempDir;

const LAYOUT: &str = "app/views/layouts/application.html.erb";
const STYLESHEET: &str = "app/assets/stylesheets/railsthemes/theme.css";

const STOCK_ROUTES: &str = "\
Shop::Application.routes.draw do
  # root :to => 'welcome#index'
end
";

// ---------------------------------------------------------------------------
// External tools
// ---------------------------------------------------------------------------

/// Runs `tar` for real and answers Rails commands from canned output.
struct RailsTools {
    routes: Cell<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl RailsTools {
    fn new() -> Self {
        Self {
            routes: Cell::new(""),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn programs(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for RailsTools {
    fn run(&self, working_dir: &Utf8Path, program: &str, args: &[String]) -> InstallerResult<Output> {
        self.calls.borrow_mut().push(program.to_owned());
        match program {
            "tar" => SystemCommandExecutor.run(working_dir, program, args),
            "rake" => Ok(stdout_output(self.routes.get())),
            "rails" => Ok(success_output()),
            other => panic!("unexpected program {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Install world
// ---------------------------------------------------------------------------

struct InstallWorld {
    _temp: TempDir,
    root: Utf8PathBuf,
    project: Utf8PathBuf,
    scratch: Utf8PathBuf,
    source: RefCell<Option<Utf8PathBuf>>,
    tools: RailsTools,
    output: RefCell<String>,
    result: RefCell<Option<InstallerResult<InstallOutcome>>>,
}

impl InstallWorld {
    fn project_file(&self, relative: &str) -> Utf8PathBuf {
        self.project.join(relative)
    }

    fn write(path: &Utf8Path, contents: &str) {
        let parent = path.parent().expect("file has a parent");
        fs::create_dir_all(parent).expect("create parent directories");
        fs::write(path, contents).expect("write file");
    }

    fn write_theme(&self) -> Utf8PathBuf {
        let theme = self.root.join("theme");
        Self::write(&theme.join(LAYOUT), "<themed layout>");
        Self::write(&theme.join(STYLESHEET), "body { color: teal; }");
        theme
    }

    fn take_error(&self) -> InstallerError {
        match self.result.take() {
            Some(Err(err)) => err,
            Some(Ok(outcome)) => panic!("expected an error, install returned {outcome:?}"),
            None => panic!("install was not run"),
        }
    }
}

#[fixture]
fn install_world() -> InstallWorld {
    let temp = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("temp dir is UTF-8");
    let scratch = root.join("scratch");
    fs::create_dir_all(&scratch).expect("create scratch dir");

    InstallWorld {
        project: root.join("project"),
        scratch,
        root,
        _temp: temp,
        source: RefCell::new(None),
        tools: RailsTools::new(),
        output: RefCell::new(String::new()),
        result: RefCell::new(None),
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[given("a Rails project")]
fn given_rails_project(install_world: &InstallWorld) {
    fs::create_dir_all(install_world.project.join("app")).expect("create app dir");
    InstallWorld::write(&install_world.project_file(LAYOUT), "<old layout>");
    InstallWorld::write(
        &install_world.project_file(PLACEHOLDER_INDEX),
        "<h1>Welcome aboard</h1>",
    );
    InstallWorld::write(&install_world.project_file(ROUTES_FILE), STOCK_ROUTES);
}

#[given("a directory that is not a Rails project")]
fn given_not_a_project(install_world: &InstallWorld) {
    fs::create_dir_all(install_world.project.join("app")).expect("create app dir");
}

#[given("the project already defines routes")]
fn given_routes_defined(install_world: &InstallWorld) {
    install_world
        .tools
        .routes
        .set("root  /  welcome#index\n");
}

#[given("the project defines no routes")]
fn given_no_routes(install_world: &InstallWorld) {
    install_world.tools.routes.set("");
}

#[given("a directory containing a theme")]
fn given_theme_directory(install_world: &InstallWorld) {
    let theme = install_world.write_theme();
    install_world.source.replace(Some(theme));
}

#[given("a gzipped archive containing a theme")]
fn given_theme_archive(install_world: &InstallWorld) {
    let theme = install_world.write_theme();
    let archive = install_world.root.join("theme.tar.gz");

    let file = fs::File::create(&archive).expect("create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder
        .append_dir_all("app", theme.join("app"))
        .expect("append theme files");
    builder
        .into_inner()
        .and_then(GzEncoder::finish)
        .expect("finish archive");
    fs::remove_dir_all(&theme).expect("remove unpacked theme");

    install_world.source.replace(Some(archive));
}

#[given("a missing archive")]
fn given_missing_archive(install_world: &InstallWorld) {
    install_world
        .source
        .replace(Some(install_world.root.join("missing.tar.gz")));
}

#[when("the theme is installed")]
fn when_theme_installed(install_world: &InstallWorld) {
    let source = install_world.source.borrow().clone();
    let mut out = Vec::new();

    let result = Installer::new(
        install_world.project.clone(),
        &install_world.tools,
        &mut out,
        false,
    )
    .with_workspace_parent(install_world.scratch.clone())
    .install(&InstallRequest::File(source));

    install_world
        .output
        .replace(String::from_utf8(out).expect("progress output is UTF-8"));
    install_world.result.replace(Some(result));
}

#[then("the theme files are copied into the project")]
fn then_theme_files_copied(install_world: &InstallWorld) {
    let result = install_world.result.borrow();
    match result.as_ref().expect("install was run") {
        Ok(InstallOutcome::Installed(summary)) => assert_eq!(summary.files_copied, 2),
        other => panic!("expected an install, got {other:?}"),
    }

    let layout = fs::read_to_string(install_world.project_file(LAYOUT)).expect("read layout");
    assert_eq!(layout, "<themed layout>");
    assert!(install_world.project_file(STYLESHEET).is_file());
    assert!(install_world.output.borrow().contains("Yay! Your theme is installed!"));
}

#[then("the previous layout is kept as a backup")]
fn then_layout_backed_up(install_world: &InstallWorld) {
    let backup = install_world.project_file(&format!("{LAYOUT}.old"));
    let contents = fs::read_to_string(backup).expect("read backup");
    assert_eq!(contents, "<old layout>");
}

#[then("the placeholder index page is removed")]
fn then_placeholder_removed(install_world: &InstallWorld) {
    assert!(!install_world.project_file(PLACEHOLDER_INDEX).exists());
}

#[then("no extraction workspace remains")]
fn then_no_workspace(install_world: &InstallWorld) {
    let leftovers = fs::read_dir(&install_world.scratch)
        .expect("read scratch dir")
        .count();
    assert_eq!(leftovers, 0);
}

#[then("the welcome controller is generated")]
fn then_welcome_generated(install_world: &InstallWorld) {
    assert!(install_world.tools.programs().contains(&"rails".to_owned()));
}

#[then("the root route is enabled")]
fn then_root_route_enabled(install_world: &InstallWorld) {
    let routes =
        fs::read_to_string(install_world.project_file(ROUTES_FILE)).expect("read routes file");
    assert!(routes.lines().any(|line| line == ACTIVE_ROOT_ROUTE));
    assert!(!routes.contains("# root"));
}

#[then("the installer reports that this is not a project root")]
fn then_not_project_root(install_world: &InstallWorld) {
    let err = install_world.take_error();
    assert!(
        matches!(err, InstallerError::NotProjectRoot { .. }),
        "unexpected error: {err}"
    );
}

#[then("no external tools were run")]
fn then_no_tools_run(install_world: &InstallWorld) {
    assert!(install_world.tools.programs().is_empty());
}

#[then("the installer reports that the file cannot be found")]
fn then_file_not_found(install_world: &InstallWorld) {
    let err = install_world.take_error();
    assert!(
        matches!(err, InstallerError::SourceNotFound { .. }),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains("missing.tar.gz"));
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/install.feature", index = 0)]
fn scenario_install_from_directory(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 1)]
fn scenario_install_from_archive(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 2)]
fn scenario_generate_welcome_page(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 3)]
fn scenario_refuse_outside_project(install_world: InstallWorld) {
    let _ = install_world;
}

#[scenario(path = "tests/features/install.feature", index = 4)]
fn scenario_missing_archive(install_world: InstallWorld) {
    let _ = install_world;
}
