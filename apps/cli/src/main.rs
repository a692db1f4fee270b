use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use qlthemes_render::{
    combine_preview, combine_side_by_side, encode_png, render_thumbnail, FontCatalog, PixelSize,
};
use qlthemes_settings::{PreviewSettings, SettingsStore};
use qlthemes_theme::{
    duplicate_and_notify, save_and_notify, FontRequest, Theme, ThemeEvent, ThemeEvents,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "QLTHEMES_LOG";

#[derive(Parser)]
#[command(
    name = "qlthemes",
    about = "Export and preview syntax-highlighting themes",
    author,
    version
)]
struct Cli {
    /// 預覽設定檔路徑。 / Preview settings JSON file.
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 輸出主題的 CSS 樣式表。 / Print the theme's CSS stylesheet.
    Css(ThemeArgs),
    /// 產生 HTML 預覽文件。 / Produce the HTML preview document.
    Html(TextOutputArgs),
    /// 匯出醒目提示主題檔。 / Export the highlighter theme file.
    Export(TextOutputArgs),
    /// 繪製主題縮圖 PNG。 / Render a thumbnail PNG.
    Thumbnail(ThumbnailArgs),
    /// 合併亮色與暗色主題預覽。 / Combine a light and a dark theme preview.
    Combine(CombineArgs),
    /// 將主題檔寫入主題資料夾。 / Save the theme file into the themes folder.
    Save(SaveArgs),
    /// 複製主題為新的 JSON 文件。 / Duplicate a theme into a new JSON document.
    Duplicate(DuplicateArgs),
}

#[derive(Args)]
struct ThemeArgs {
    /// 主題 JSON 檔。 / Theme JSON document.
    #[arg(value_name = "THEME")]
    theme: PathBuf,
}

#[derive(Args)]
struct TextOutputArgs {
    /// 主題 JSON 檔。 / Theme JSON document.
    #[arg(value_name = "THEME")]
    theme: PathBuf,
    /// 輸出檔案；略過時寫到標準輸出。 / Output file; stdout when omitted.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ThumbnailArgs {
    /// 主題 JSON 檔。 / Theme JSON document.
    #[arg(value_name = "THEME")]
    theme: PathBuf,
    /// 輸出 PNG 路徑。 / Output PNG path.
    #[arg(long, value_name = "PNG")]
    output: PathBuf,
    /// 縮圖邊長（像素）。 / Thumbnail side in pixels.
    #[arg(long, value_name = "N")]
    size: Option<u32>,
    /// 字型大小（點）。 / Font size in points.
    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,
}

#[derive(Args)]
struct CombineArgs {
    /// 亮色主題 JSON 檔。 / Light theme JSON document.
    #[arg(long, value_name = "THEME", required_unless_present = "dark")]
    light: Option<PathBuf>,
    /// 暗色主題 JSON 檔。 / Dark theme JSON document.
    #[arg(long, value_name = "THEME")]
    dark: Option<PathBuf>,
    /// 輸出 PNG 路徑。 / Output PNG path.
    #[arg(long, value_name = "PNG")]
    output: PathBuf,
    /// 並排而非對角分割。 / Place the previews side by side instead of splitting diagonally.
    #[arg(long)]
    side_by_side: bool,
    /// 每個預覽的邊長（像素）。 / Side of each preview in pixels.
    #[arg(long, value_name = "N")]
    size: Option<u32>,
    /// 並排時的間距（像素）。 / Gap between side-by-side previews in pixels.
    #[arg(long, value_name = "N")]
    spacing: Option<u32>,
}

#[derive(Args)]
struct SaveArgs {
    /// 主題 JSON 檔。 / Theme JSON document.
    #[arg(value_name = "THEME")]
    theme: PathBuf,
    /// 主題資料夾；預設使用設定檔中的值。 / Themes folder; defaults to the configured one.
    #[arg(long, value_name = "DIR")]
    themes_dir: Option<PathBuf>,
}

#[derive(Args)]
struct DuplicateArgs {
    /// 主題 JSON 檔。 / Theme JSON document.
    #[arg(value_name = "THEME")]
    theme: PathBuf,
    /// 複本的 JSON 路徑。 / JSON path of the copy.
    #[arg(long, value_name = "JSON")]
    output: PathBuf,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let Cli { settings, command } = Cli::parse();
    let settings = load_settings(settings.as_deref())?;
    let mut events = logged_events();
    match command {
        Commands::Css(args) => {
            let theme = load_theme(&args.theme)?;
            print!("{}", theme.to_css());
            Ok(())
        }
        Commands::Html(args) => {
            let theme = load_theme(&args.theme)?;
            write_text(args.output.as_deref(), &theme.to_html_preview())
        }
        Commands::Export(args) => {
            let theme = load_theme(&args.theme)?;
            write_text(args.output.as_deref(), &theme.to_theme_file_text())
        }
        Commands::Thumbnail(args) => execute_thumbnail(args, &settings),
        Commands::Combine(args) => execute_combine(args, &settings),
        Commands::Save(args) => execute_save(args, &settings, &mut events),
        Commands::Duplicate(args) => {
            let theme = load_theme(&args.theme)?;
            let copy = duplicate_and_notify(&theme, &mut events);
            let json = copy
                .to_json_string()
                .with_context(|| format!("failed to serialize copy of {}", theme.name()))?;
            write_text(Some(&args.output), &json)?;
            println!("{}", args.output.display());
            Ok(())
        }
    }
}

fn logged_events() -> ThemeEvents {
    let mut events = ThemeEvents::new();
    events.subscribe(|event| match event {
        ThemeEvent::Saved(saved) => {
            tracing::info!(theme = %saved.name, path = %saved.path.display(), "theme saved")
        }
        ThemeEvent::Added { name } => tracing::info!(theme = %name, "theme added"),
        ThemeEvent::Deleted { name } => tracing::info!(theme = %name, "theme deleted"),
        ThemeEvent::CurrentChanged { name } => {
            tracing::info!(theme = ?name, "current theme changed")
        }
    });
    events
}

fn load_settings(path: Option<&Path>) -> Result<PreviewSettings> {
    match path {
        Some(path) => {
            let store = SettingsStore::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            Ok(store.settings().clone())
        }
        None => Ok(PreviewSettings::default()),
    }
}

fn load_theme(path: &Path) -> Result<Theme> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read theme {}", path.display()))?;
    Theme::from_json_str(&contents)
        .with_context(|| format!("failed to parse theme {}", path.display()))
}

fn write_text(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn thumbnail_font(settings: &PreviewSettings, font_size: Option<f32>) -> FontRequest {
    FontRequest::new(
        settings.thumbnail.font_family.clone(),
        font_size.unwrap_or(settings.thumbnail.font_size),
    )
}

fn execute_thumbnail(args: ThumbnailArgs, settings: &PreviewSettings) -> Result<()> {
    let theme = load_theme(&args.theme)?;
    let size = args.size.unwrap_or(settings.thumbnail.size);
    let font = thumbnail_font(settings, args.font_size);
    let image = render_thumbnail(&theme, PixelSize::square(size), &font, &FontCatalog::system())
        .ok_or_else(|| anyhow!("cannot render a {size}x{size} thumbnail"))?;
    let data = encode_png(&image)?;
    fs::write(&args.output, data)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("{}", args.output.display());
    Ok(())
}

fn execute_combine(args: CombineArgs, settings: &PreviewSettings) -> Result<()> {
    let light = args.light.as_deref().map(load_theme).transpose()?;
    let dark = args.dark.as_deref().map(load_theme).transpose()?;
    let size = args.size.unwrap_or(settings.thumbnail.size);
    let fonts = FontCatalog::system();

    let image = if args.side_by_side {
        let spacing = args.spacing.unwrap_or(settings.thumbnail.spacing);
        combine_side_by_side(light.as_ref(), dark.as_ref(), size, spacing, &fonts)
    } else {
        let font = thumbnail_font(settings, None);
        let render = |theme: &Theme| render_thumbnail(theme, PixelSize::square(size), &font, &fonts);
        let light_image = light.as_ref().and_then(render);
        let dark_image = dark.as_ref().and_then(render);
        combine_preview(light_image.as_ref(), dark_image.as_ref())
    }
    .ok_or_else(|| anyhow!("cannot render a combined preview at size {size}"))?;

    let data = encode_png(&image)?;
    fs::write(&args.output, data)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("{}", args.output.display());
    Ok(())
}

fn execute_save(args: SaveArgs, settings: &PreviewSettings, events: &mut ThemeEvents) -> Result<()> {
    let mut theme = load_theme(&args.theme)?;
    let folder = args.themes_dir.or_else(|| settings.themes_folder.clone());
    let name = theme.name().to_string();
    let saved = save_and_notify(&mut theme, folder.as_deref(), events)
        .with_context(|| format!("failed to save theme {name}"))?;
    println!("{}", saved.path.display());
    Ok(())
}
