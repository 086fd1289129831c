use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use structopt::StructOpt;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use pakform::draft::FsDraftStore;
use pakform::{document, Editor, ExportError, Request};

#[derive(Debug, StructOpt)]
#[structopt()]
struct Args {
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
struct InitCommand {
    #[structopt(short, long)]
    name: Option<String>,

    #[structopt(short, long)]
    bundle_id: Option<String>,

    #[structopt(short = "V", long)]
    version: Option<String>,

    #[structopt(parse(from_os_str))]
    output_path: Option<PathBuf>,
}

impl InitCommand {
    fn to_partial<'a>(&'a self) -> document::init::PartialRequest<'a> {
        document::init::PartialRequest::builder()
            .name(self.name.as_ref().map(|x| &**x))
            .bundle_id(self.bundle_id.as_ref().map(|x| &**x))
            .version(self.version.as_ref().map(|x| &**x))
            .build()
    }
}

#[derive(Debug, StructOpt)]
struct ValidateCommand {
    #[structopt(parse(from_os_str))]
    path: PathBuf,
}

#[derive(Debug, StructOpt)]
struct PreviewCommand {
    #[structopt(parse(from_os_str))]
    path: PathBuf,
}

#[derive(Debug, StructOpt)]
struct ExportCommand {
    #[structopt(parse(from_os_str))]
    path: PathBuf,

    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Debug, StructOpt)]
enum DraftCommand {
    /// Store a descriptor file as the working draft.
    Save {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },
    /// Write the working draft out again (stdout when no path is given).
    Restore {
        #[structopt(parse(from_os_str))]
        output_path: Option<PathBuf>,
    },
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Create a new descriptor from the canonical defaults.
    Init(InitCommand),
    /// Report schema violations for a descriptor file.
    Validate(ValidateCommand),
    /// Print the canonical JSON for a descriptor file.
    Preview(PreviewCommand),
    /// Validate and write `<name>.json` to the output directory.
    Export(ExportCommand),
    /// Save or restore the local working draft.
    Draft(DraftCommand),
}

fn status(color: Color, first: &str, rest: &str) -> Result<(), io::Error> {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true).set_bold(true))?;
    write!(&mut stderr, "{:>12}", first)?;
    stderr.reset()?;
    writeln!(&mut stderr, " {}", rest)?;
    Ok(())
}

fn load_editor(path: &Path) -> anyhow::Result<Editor> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    let mut editor = Editor::new();
    editor
        .load_json(&text)
        .with_context(|| format!("could not load `{}`", path.display()))?;
    Ok(editor)
}

fn report_violations(editor: &Editor) -> anyhow::Result<bool> {
    match editor.validate() {
        Ok(()) => {
            status(Color::Green, "Valid", &editor.document().name)?;
            Ok(true)
        }
        Err(violations) => {
            for violation in &violations {
                status(Color::Red, "Violation", &violation.to_string())?;
            }
            Ok(false)
        }
    }
}

fn default_draft_store() -> anyhow::Result<FsDraftStore> {
    let dir = FsDraftStore::default_dir()
        .context("no configuration directory is available on this platform")?;
    Ok(FsDraftStore::new(dir))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::from_args();

    match args.command {
        Command::Init(init) => {
            let req = document::init::Request::new_from_user_input(init.to_partial())?;
            let document = document::init::init(req);
            let text = document.to_json()?;

            match init.output_path {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("could not write `{}`", path.display()))?;
                    status(Color::Green, "Created", &path.display().to_string())?;
                }
                None => println!("{}", text),
            }
        }
        Command::Validate(validate) => {
            let editor = load_editor(&validate.path)?;
            if !report_violations(&editor)? {
                anyhow::bail!("document has unresolved validation failures");
            }
        }
        Command::Preview(preview) => {
            let editor = load_editor(&preview.path)?;
            println!("{}", editor.preview()?);
        }
        Command::Export(export) => {
            let editor = load_editor(&export.path)?;
            let artifact = match editor.export() {
                Ok(artifact) => artifact,
                Err(ExportError::Invalid(violations)) => {
                    for violation in &violations {
                        status(Color::Red, "Violation", &violation.to_string())?;
                    }
                    anyhow::bail!("export is blocked until all violations are resolved");
                }
                Err(e) => return Err(e.into()),
            };

            let path = export.output_dir.join(&artifact.filename);
            fs::write(&path, &artifact.bytes)
                .with_context(|| format!("could not write `{}`", path.display()))?;
            status(Color::Green, "Exported", &path.display().to_string())?;
        }
        Command::Draft(DraftCommand::Save { path }) => {
            let editor = load_editor(&path)?;
            let mut store = default_draft_store()?;
            editor.save_draft(&mut store)?;
            status(Color::Green, "Saved", "working draft")?;
        }
        Command::Draft(DraftCommand::Restore { output_path }) => {
            let mut editor = Editor::new();
            editor.restore_draft(&default_draft_store()?)?;
            let text = editor.preview()?;

            match output_path {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("could not write `{}`", path.display()))?;
                    status(Color::Green, "Restored", &path.display().to_string())?;
                }
                None => println!("{}", text),
            }
        }
    }

    Ok(())
}
