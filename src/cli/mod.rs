use auragen::api::AuraApi;
use auragen::error::{AuraError, Result};
use auragen::gemini::{Attachment, GeminiError};
use auragen::history::EditHistory;
use auragen::model::{AspectRatio, EditParams, ImageSize, Snapshot, SortOrder};
use auragen::model::{ChatMessage, RecordPatch};
use auragen::store::fs::FileStore;
use auragen::workflows::edit::EditRequest;
use auragen::workflows::generate::GenerateRequest;
use clap::{Parser, Subcommand};
use colored::Colorize;
use directories::ProjectDirs;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

mod print;
use print::{print_comparison, print_messages, print_presets, print_records};

/// Environment override for the data directory, used by tests and
/// scripted setups.
const DATA_DIR_ENV: &str = "AURAGEN_DATA_DIR";

#[derive(Parser, Debug)]
#[command(name = "auragen", version)]
#[command(about = "Gemini-backed creative studio: generate, edit, chat, vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for the local store (overrides the platform default)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an image from a text directive
    #[command(alias = "gen")]
    Generate {
        prompt: String,

        /// Things to exclude from the render
        #[arg(short, long)]
        negative: Option<String>,

        /// Aspect ratio (1:1, 3:4, 4:3, 9:16, 16:9)
        #[arg(short, long, default_value = "1:1", value_parser = AspectRatio::from_str)]
        ratio: AspectRatio,

        /// Output size tag (1K, 2K, 4K)
        #[arg(short, long, default_value = "1K", value_parser = ImageSize::from_str)]
        size: ImageSize,

        /// Reference image to guide the render
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Style preset to fold into the prompt (builtin or custom)
        #[arg(long)]
        style: Option<String>,

        /// Also write the render to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Edit/outpaint an image (one-shot, or --session for undo/redo)
    Edit {
        image: PathBuf,

        /// Edit directive (defaults to detail enhancement)
        directive: Option<String>,

        /// Target aspect ratio for outpainting
        #[arg(short, long, default_value = "1:1", value_parser = AspectRatio::from_str)]
        ratio: AspectRatio,

        #[arg(long, default_value_t = 100)]
        brightness: u32,
        #[arg(long, default_value_t = 100)]
        contrast: u32,
        #[arg(long, default_value_t = 100)]
        saturation: u32,
        #[arg(long, default_value_t = 100)]
        exposure: u32,
        #[arg(long, default_value_t = 0)]
        crop: u32,

        /// Interactive session with undo/redo
        #[arg(long)]
        session: bool,

        /// Write the edited image to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Talk to the multimodal assistant (one-shot, or REPL without a message)
    Chat {
        message: Option<String>,

        /// Attach an image/video/audio file
        #[arg(long)]
        attach: Option<PathBuf>,

        /// Pin the thinking budget
        #[arg(long)]
        thinking: bool,
    },

    /// Transcribe an audio file
    Transcribe { audio: PathBuf },

    /// Synthesize speech from text (writes a WAV file)
    Speak {
        text: String,

        /// Prebuilt voice name
        #[arg(long)]
        voice: Option<String>,

        #[arg(short, long, default_value = "speech.wav")]
        out: PathBuf,
    },

    /// Inspect and manage the vault
    #[command(alias = "vault")]
    Gallery {
        #[command(subcommand)]
        command: GalleryCommands,
    },

    /// Manage style presets
    Presets {
        #[command(subcommand)]
        command: PresetCommands,
    },

    /// Open a session
    Login,

    /// Close the session
    Logout,

    /// Manage the API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Clear all local state (vault, presets, session, API key)
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum GalleryCommands {
    /// List vaulted records
    #[command(alias = "ls")]
    List {
        /// Filter by prompt substring
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (newest, oldest)
        #[arg(long, default_value = "newest", value_parser = SortOrder::from_str)]
        sort: SortOrder,
    },

    /// Search vaulted records by prompt substring
    Search {
        term: String,

        #[arg(long, default_value = "newest", value_parser = SortOrder::from_str)]
        sort: SortOrder,
    },

    /// Delete records by id
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Replace the tags on a record
    Tag {
        id: String,
        #[arg(num_args = 0..)]
        tags: Vec<String>,
    },

    /// Export records to image files
    Export {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Show a processed record next to its inferred source
    Compare { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    #[command(alias = "ls")]
    List,
    Add { name: String, tags: String },
    Remove { selector: String },
}

#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    Set { key: String },
    Clear,
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = FileStore::new(resolve_data_dir(&cli));
    let mut api = AuraApi::new(store);

    match cli.command {
        Commands::Generate {
            prompt,
            negative,
            ratio,
            size,
            reference,
            style,
            out,
        } => {
            handle_generate(&mut api, prompt, negative, ratio, size, reference, style, out).await
        }
        Commands::Edit {
            image,
            directive,
            ratio,
            brightness,
            contrast,
            saturation,
            exposure,
            crop,
            session,
            out,
        } => {
            let params = EditParams {
                brightness,
                contrast,
                saturation,
                exposure,
                crop,
            }
            .clamped();
            if session {
                handle_edit_session(&mut api, &image, ratio, params).await
            } else {
                handle_edit(&mut api, &image, directive, ratio, params, out).await
            }
        }
        Commands::Chat {
            message,
            attach,
            thinking,
        } => handle_chat(&mut api, message, attach, thinking).await,
        Commands::Transcribe { audio } => handle_transcribe(&mut api, &audio).await,
        Commands::Speak { text, voice, out } => handle_speak(&mut api, text, voice, out).await,
        Commands::Gallery { command } => handle_gallery(&mut api, command),
        Commands::Presets { command } => handle_presets(&mut api, command),
        Commands::Login => {
            let result = api.login()?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Logout => {
            let result = api.logout()?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Key { command } => handle_key(&mut api, command),
        Commands::Reset { yes } => handle_reset(&mut api, yes),
    }
}

fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    let proj_dirs =
        ProjectDirs::from("com", "auragen", "auragen").expect("Could not determine data dir");
    proj_dirs.data_dir().to_path_buf()
}

fn require_session(api: &AuraApi<FileStore>) -> Result<()> {
    if api.is_authenticated() {
        return Ok(());
    }
    Err(AuraError::Api(
        "Not logged in. Run `auragen login` first.".into(),
    ))
}

/// The one cross-cutting error-driven transition: a rejected credential
/// resets the auth gate before the error surfaces.
fn recover_credentials(api: &mut AuraApi<FileStore>, err: AuraError) -> AuraError {
    if matches!(err, AuraError::Gemini(GeminiError::CredentialRejected)) {
        match api.handle_credential_failure() {
            Ok(result) => print_messages(&result.messages),
            Err(reset_err) => eprintln!("{}", reset_err.to_string().red()),
        }
    }
    err
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").expect("valid spinner template"),
    );
    bar.enable_steady_tick(Duration::from_millis(80));
    bar.set_message(message.to_string());
    bar
}

#[allow(clippy::too_many_arguments)]
async fn handle_generate(
    api: &mut AuraApi<FileStore>,
    prompt: String,
    negative: Option<String>,
    ratio: AspectRatio,
    size: ImageSize,
    reference: Option<PathBuf>,
    style: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    require_session(api)?;

    let prompt = match style {
        Some(selector) => {
            let preset = api.resolve_preset(&selector)?.ok_or_else(|| {
                AuraError::Api(format!("No such style preset: {}", selector))
            })?;
            format!("{}, {}", prompt, preset.tags)
        }
        None => prompt,
    };

    let reference = reference
        .map(|path| Attachment::from_path(&path))
        .transpose()
        .map_err(AuraError::Io)?;

    let request = GenerateRequest {
        prompt,
        negative,
        ratio,
        size,
        reference,
    };

    let bar = spinner("Initializing pipeline...");
    let outcome = api.generate(request).await;
    bar.finish_and_clear();
    let result = outcome.map_err(|e| recover_credentials(api, e))?;

    print_messages(&result.messages);
    if let (Some(out), Some(record)) = (out, result.affected_records.first()) {
        write_data_url(&out, &record.url)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

async fn handle_edit(
    api: &mut AuraApi<FileStore>,
    image: &Path,
    directive: Option<String>,
    ratio: AspectRatio,
    params: EditParams,
    out: Option<PathBuf>,
) -> Result<()> {
    require_session(api)?;

    let source = Attachment::from_path(image).map_err(AuraError::Io)?;
    let mut history = EditHistory::new();
    // The import is itself a committed state, so undo can return to it.
    history.commit(Snapshot {
        image_url: source.to_data_url(),
        aspect_ratio: ratio,
        params,
    });

    let request = EditRequest {
        source,
        prompt: directive,
        ratio,
        params,
    };

    let bar = spinner("Rendering...");
    let outcome = api.edit(&mut history, request).await;
    bar.finish_and_clear();
    let result = outcome.map_err(|e| recover_credentials(api, e))?;

    print_messages(&result.messages);
    if let (Some(out), Some(record)) = (out, result.affected_records.first()) {
        write_data_url(&out, &record.url)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

async fn handle_edit_session(
    api: &mut AuraApi<FileStore>,
    image: &Path,
    ratio: AspectRatio,
    params: EditParams,
) -> Result<()> {
    require_session(api)?;

    let source = Attachment::from_path(image).map_err(AuraError::Io)?;
    let mut history = EditHistory::new();
    history.commit(Snapshot {
        image_url: source.to_data_url(),
        aspect_ratio: ratio,
        params,
    });

    println!("{}", "Interactive edit session.".bold());
    println!(
        "Commands: render [directive] | ratio <r> | brightness/contrast/saturation/exposure/crop <n> | undo | redo | show | save <path> | quit"
    );

    let mut ratio = ratio;
    let mut params = params;
    let stdin = std::io::stdin();
    loop {
        print!("{} ", console::style("edit>").cyan().bold());
        std::io::stdout().flush().map_err(AuraError::Io)?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(AuraError::Io)? == 0 {
            break;
        }
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };

        match verb {
            "" => continue,
            "quit" | "exit" => break,
            "undo" => match history.undo() {
                Some(snapshot) => {
                    ratio = snapshot.aspect_ratio;
                    params = snapshot.params;
                    println!("Restored state {} of {}.", position(&history), history.len());
                }
                None => println!("Nothing to undo."),
            },
            "redo" => match history.redo() {
                Some(snapshot) => {
                    ratio = snapshot.aspect_ratio;
                    params = snapshot.params;
                    println!("Restored state {} of {}.", position(&history), history.len());
                }
                None => println!("Nothing to redo."),
            },
            "show" => {
                println!(
                    "state {}/{}  ratio {}  brightness {}% contrast {}% saturation {}% exposure {}% crop {}%",
                    position(&history),
                    history.len(),
                    ratio,
                    params.brightness,
                    params.contrast,
                    params.saturation,
                    params.exposure,
                    params.crop
                );
            }
            "ratio" => match rest.parse::<AspectRatio>() {
                Ok(parsed) => ratio = parsed,
                Err(e) => println!("{}", e.red()),
            },
            "brightness" | "contrast" | "saturation" | "exposure" | "crop" => {
                match rest.parse::<u32>() {
                    Ok(value) => {
                        match verb {
                            "brightness" => params.brightness = value,
                            "contrast" => params.contrast = value,
                            "saturation" => params.saturation = value,
                            "exposure" => params.exposure = value,
                            _ => params.crop = value,
                        }
                        params = params.clamped();
                    }
                    Err(_) => println!("{}", "Expected a number.".red()),
                }
            }
            "save" => {
                if rest.is_empty() {
                    println!("{}", "Usage: save <path>".red());
                    continue;
                }
                match history.current() {
                    Some(snapshot) => {
                        write_data_url(Path::new(rest), &snapshot.image_url)?;
                        println!("Wrote {}", rest);
                    }
                    None => println!("Nothing to save."),
                }
            }
            "render" => {
                let Some(current) = history.current().cloned() else {
                    println!("Nothing to render from.");
                    continue;
                };
                let Some(source) = Attachment::from_data_url(&current.image_url) else {
                    println!("{}", "Current state is not stored inline.".red());
                    continue;
                };
                let request = EditRequest {
                    source,
                    prompt: (!rest.is_empty()).then(|| rest.to_string()),
                    ratio,
                    params,
                };
                let bar = spinner("Rendering...");
                let outcome = api.edit(&mut history, request).await;
                bar.finish_and_clear();
                match outcome {
                    Ok(result) => print_messages(&result.messages),
                    Err(e) => {
                        let e = recover_credentials(api, e);
                        println!("{}", e.to_string().red());
                        if matches!(e, AuraError::Gemini(GeminiError::CredentialRejected)) {
                            return Err(e);
                        }
                    }
                }
            }
            other => println!("Unknown command: {}", other),
        }
    }
    Ok(())
}

/// 1-based cursor position for display.
fn position(history: &EditHistory) -> usize {
    history.position().map_or(0, |c| c + 1)
}

async fn handle_chat(
    api: &mut AuraApi<FileStore>,
    message: Option<String>,
    attach: Option<PathBuf>,
    thinking: bool,
) -> Result<()> {
    require_session(api)?;

    let attachment = attach
        .map(|path| Attachment::from_path(&path))
        .transpose()
        .map_err(AuraError::Io)?;

    if let Some(message) = message {
        let bar = spinner("Thinking...");
        let outcome = api.chat(&message, attachment.as_ref(), thinking).await;
        bar.finish_and_clear();
        let reply = outcome.map_err(|e| recover_credentials(api, e))?;
        println!("{}", reply);
        return Ok(());
    }

    // REPL: the attachment rides along with the first message only.
    println!(
        "{}",
        "Hello! I am AuraGen. I can analyze images, understand videos and solve complex problems."
            .dimmed()
    );
    let mut transcript: Vec<ChatMessage> = Vec::new();
    let mut pending_attachment = attachment;
    let stdin = std::io::stdin();
    loop {
        print!("{} ", console::style("you>").green().bold());
        std::io::stdout().flush().map_err(AuraError::Io)?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(AuraError::Io)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() || line == "/quit" {
            break;
        }

        let bar = spinner("Thinking...");
        let outcome = api
            .chat_session(&mut transcript, line, pending_attachment.as_ref(), thinking)
            .await;
        bar.finish_and_clear();
        pending_attachment = None;

        match outcome {
            Ok(reply) => {
                println!("{} {}", "auragen>".cyan().bold(), reply);
            }
            Err(e) => {
                let e = recover_credentials(api, e);
                if matches!(e, AuraError::Gemini(GeminiError::CredentialRejected)) {
                    return Err(e);
                }
                println!("{}", "Service temporarily unavailable. Please try again.".red());
            }
        }
    }
    Ok(())
}

async fn handle_transcribe(api: &mut AuraApi<FileStore>, audio: &Path) -> Result<()> {
    require_session(api)?;
    let attachment = Attachment::from_path(audio).map_err(AuraError::Io)?;
    let bar = spinner("Transcribing...");
    let outcome = api.transcribe(&attachment).await;
    bar.finish_and_clear();
    let text = outcome.map_err(|e| recover_credentials(api, e))?;
    println!("{}", text);
    Ok(())
}

async fn handle_speak(
    api: &mut AuraApi<FileStore>,
    text: String,
    voice: Option<String>,
    out: PathBuf,
) -> Result<()> {
    require_session(api)?;
    let bar = spinner("Synthesizing...");
    let outcome = api.speak(&text, voice.as_deref()).await;
    bar.finish_and_clear();
    let wav = outcome.map_err(|e| recover_credentials(api, e))?;
    std::fs::write(&out, wav).map_err(AuraError::Io)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn handle_gallery(api: &mut AuraApi<FileStore>, command: GalleryCommands) -> Result<()> {
    require_session(api)?;
    match command {
        GalleryCommands::List { search, sort } => {
            let result = api.list_records(search.as_deref().unwrap_or(""), sort)?;
            print_records(&result.listed_records);
            print_messages(&result.messages);
        }
        GalleryCommands::Search { term, sort } => {
            let result = api.list_records(&term, sort)?;
            print_records(&result.listed_records);
            print_messages(&result.messages);
        }
        GalleryCommands::Delete { ids } => {
            let result = api.delete_records(&ids)?;
            print_messages(&result.messages);
        }
        GalleryCommands::Tag { id, tags } => {
            let patch = RecordPatch {
                tags: Some(tags),
                ..Default::default()
            };
            let result = api.update_record(&id, patch)?;
            print_messages(&result.messages);
        }
        GalleryCommands::Export { ids, out } => {
            let result = api.export_records(&ids, &out)?;
            for path in &result.written_paths {
                println!("Wrote {}", path.display());
            }
            print_messages(&result.messages);
        }
        GalleryCommands::Compare { id } => {
            let result = api.compare_record(&id)?;
            if let Some(pair) = &result.comparison {
                print_comparison(pair);
            }
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_presets(api: &mut AuraApi<FileStore>, command: PresetCommands) -> Result<()> {
    require_session(api)?;
    match command {
        PresetCommands::List => {
            let result = api.list_presets()?;
            print_presets(&result.presets);
        }
        PresetCommands::Add { name, tags } => {
            let result = api.add_preset(&name, &tags)?;
            print_messages(&result.messages);
        }
        PresetCommands::Remove { selector } => {
            let result = api.remove_preset(&selector)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_key(api: &mut AuraApi<FileStore>, command: KeyCommands) -> Result<()> {
    match command {
        KeyCommands::Set { key } => {
            let result = api.set_api_key(&key)?;
            print_messages(&result.messages);
        }
        KeyCommands::Clear => {
            let result = api.clear_api_key()?;
            print_messages(&result.messages);
        }
        KeyCommands::Status => {
            if api.has_api_key() {
                println!("API key configured.");
            } else {
                println!("No API key. Run `auragen key set <key>` or export GEMINI_API_KEY.");
            }
        }
    }
    Ok(())
}

fn handle_reset(api: &mut AuraApi<FileStore>, yes: bool) -> Result<()> {
    if !yes {
        print!("This clears the vault, presets, session and API key. Type 'reset' to confirm: ");
        std::io::stdout().flush().map_err(AuraError::Io)?;
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(AuraError::Io)?;
        if line.trim() != "reset" {
            println!("Aborted.");
            return Ok(());
        }
    }
    let result = api.factory_reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn write_data_url(path: &Path, url: &str) -> Result<()> {
    use base64::Engine;
    let payload = auragen::gemini::payload::data_url_payload(url)
        .ok_or_else(|| AuraError::Api("Result is not stored inline".into()))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AuraError::Store(format!("Corrupt image data: {}", e)))?;
    std::fs::write(path, bytes).map_err(AuraError::Io)?;
    Ok(())
}
