//! # menucanvas CLI
//!
//! Usage:
//!   menucanvas menu.json -o cardapio.png
//!   curl -s https://api.example/menus | menucanvas --menu-id abc123
//!   menucanvas --example > menu.json

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use menucanvas::config::MenuConfig;
use menucanvas::output::default_file_name;
use menucanvas::provider::{JsonMenuStore, MenuProvider};
use menucanvas::MenuRenderer;

#[derive(Parser, Debug)]
#[command(name = "menucanvas", version, about = "Render a menu as a shareable image")]
struct Args {
    /// Menu JSON: one record or an array of records. Reads stdin when
    /// absent or `-`.
    input: Option<PathBuf>,

    /// Output image (.png or .jpg). Defaults to cardapio-YYYY-MM-DD.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which menu to render when the input holds several.
    #[arg(long)]
    menu_id: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Background image: path, data URI or raw base64.
    #[arg(long)]
    background: Option<String>,

    /// Also write the computed layout as JSON to this path.
    #[arg(long)]
    layout_json: Option<PathBuf>,

    /// Print an example menu record and exit.
    #[arg(long)]
    example: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.example {
        print!("{}", example_menu_json());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => MenuConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MenuConfig::default(),
    };
    if let Some(background) = args.background {
        config.background.source = Some(background);
    }

    let store = read_store(args.input.as_deref())?;
    let record = store
        .fetch_menu(args.menu_id.as_deref())
        .context("Failed to select menu")?;
    debug!("Selected menu '{}' ({} items)", record.name, record.menu_items.len());

    let renderer = MenuRenderer::from_config(config).context("Failed to load fonts")?;
    let document = record.to_document();

    if let Some(path) = &args.layout_json {
        let layout = renderer.layout(&document)?;
        let json = serde_json::to_string_pretty(&layout)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write layout to {}", path.display()))?;
    }

    let image = renderer.render(&document)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_file_name(record.created_on())));
    image
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!(
        "✓ Rendered {} items ({}x{}) to {}",
        document.entries.len(),
        image.width(),
        image.height(),
        output.display()
    );
    Ok(())
}

fn read_store(input: Option<&Path>) -> Result<JsonMenuStore> {
    match input {
        Some(path) if path != Path::new("-") => JsonMenuStore::open(path)
            .with_context(|| format!("Failed to read menu from {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(JsonMenuStore::from_json(&buf)?)
        }
    }
}

fn example_menu_json() -> &'static str {
    r##"{
  "id": "cardapio-semana-12",
  "name": "Cardápio da semana",
  "deliveryTax": 5.0,
  "deliveryDay": "Sábado",
  "whatsappOrderDay": "Quinta-feira",
  "whatsappOrderTime": "18:00",
  "whatsappNumber": "5511999999999",
  "isActive": true,
  "createdAt": "2025-03-14T12:00:00Z",
  "menuItems": [
    {
      "name": "Lasanha à bolonhesa",
      "description": "Massa fresca, molho de tomate caseiro, carne moída e queijo gratinado",
      "price": 42.9,
      "order": 0
    },
    {
      "name": "Escondidinho de carne seca",
      "description": "Purê de mandioca com carne seca desfiada e requeijão",
      "price": 38.5,
      "order": 1
    },
    {
      "name": "Torta de frango",
      "description": "Massa amanteigada com recheio cremoso de frango e milho",
      "price": 29.0,
      "order": 2
    },
    {
      "name": "Pudim de leite",
      "description": "",
      "price": 12.0,
      "order": 3
    }
  ]
}
"##
}
