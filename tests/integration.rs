//! Integration tests for the menucanvas rendering pipeline.
//!
//! These tests exercise the full path from menu records to pixels.
//! They verify:
//! - Output dimensions always match the configured canvas
//! - Rows come out sorted by price with the expected spacing
//! - Footer values carry their formatted text and colors
//! - Background failures fall back to the gradient
//! - Rendering is deterministic

use menucanvas::config::MenuConfig;
use menucanvas::font::FontContext;
use menucanvas::model::*;
use menucanvas::provider::{JsonMenuStore, MenuProvider};
use menucanvas::style::Color;
use menucanvas::{MenuError, MenuRenderer};

// ─── Helpers ────────────────────────────────────────────────────

fn config_without_background() -> MenuConfig {
    let mut config = MenuConfig::default();
    config.background.source = None;
    config
}

fn builtin_renderer(config: MenuConfig) -> MenuRenderer {
    MenuRenderer::new(config, FontContext::builtin())
}

fn burger_and_pizza() -> MenuDocument {
    MenuDocument::new(
        vec![
            MenuEntry::new("Burger", "Beef patty, cheddar, pickles", 10.0),
            MenuEntry::new("Pizza", "Mozzarella and basil", 35.5),
        ],
        FooterInfo {
            delivery_tax: 5.0,
            delivery_day: "Monday".to_string(),
            order_cutoff_day: "Sunday".to_string(),
            order_cutoff_time: "18:00".to_string(),
        },
    )
}

fn assert_near(actual: u8, expected: u8) {
    assert!(
        (actual as i32 - expected as i32).abs() <= 1,
        "expected ~{}, got {}",
        expected,
        actual
    );
}

// ─── Scenarios ──────────────────────────────────────────────────

#[test]
fn test_output_matches_canvas_size() {
    let renderer = builtin_renderer(config_without_background());
    let image = renderer.render(&burger_and_pizza()).unwrap();
    assert_eq!((image.width(), image.height()), (1280, 1277));
}

#[test]
fn test_custom_canvas_size() {
    let mut config = config_without_background();
    config.canvas.width = 640;
    config.canvas.height = 900;
    let image = builtin_renderer(config).render(&burger_and_pizza()).unwrap();
    assert_eq!((image.width(), image.height()), (640, 900));
}

#[test]
fn test_burger_pizza_layout() {
    let renderer = builtin_renderer(config_without_background());
    let layout = renderer.layout(&burger_and_pizza()).unwrap();

    // Pizza (35.50) is drawn first.
    assert_eq!(layout.rows.len(), 2);
    assert_eq!(layout.rows[0].name.text, "Pizza");
    assert_eq!(layout.rows[0].price.text, "R$ 35,50");
    assert_eq!(layout.rows[1].name.text, "Burger");
    assert_eq!(layout.rows[1].price.text, "R$ 10,00");

    // Two single-line rows in a 907px band: spacing 35, centered.
    assert_eq!(layout.spacing, 35.0);
    assert_eq!(layout.content_height, 155.0);
    assert_eq!(layout.start_y, 200.0 + 376.0);
    assert_eq!(layout.rows[1].y, layout.rows[0].y + 60.0 + 35.0);
    assert!(!layout.overflows);
}

#[test]
fn test_burger_pizza_footer() {
    let renderer = builtin_renderer(config_without_background());
    let layout = renderer.layout(&burger_and_pizza()).unwrap();

    let values: Vec<(&str, Color)> = layout
        .footer
        .iter()
        .map(|cell| (cell.value.text.as_str(), cell.value.style.color))
        .collect();
    assert_eq!(
        values,
        vec![
            ("Monday", Color::hex("#4caf50")),
            ("Sunday 18:00", Color::hex("#ff9800")),
            ("R$ 5,00", Color::hex("#ffd700")),
        ]
    );

    let labels: Vec<&str> = layout.footer.iter().map(|c| c.label.text.as_str()).collect();
    assert_eq!(labels, vec!["Dia das entregas", "Pedidos até", "Taxa de entrega"]);
    for cell in &layout.footer {
        assert_eq!(cell.label.style.color, Color::WHITE);
    }
}

#[test]
fn test_single_entry_is_centered() {
    let renderer = builtin_renderer(config_without_background());
    let doc = MenuDocument::new(
        vec![MenuEntry::new("Sopa", "", 18.0)],
        FooterInfo::default(),
    );
    let layout = renderer.layout(&doc).unwrap();
    assert_eq!(layout.spacing, 0.0);
    let row = &layout.rows[0];
    let band_center = (layout.band.top + layout.band.bottom) / 2.0;
    assert!((row.y + row.height / 2.0 - band_center).abs() < 1e-9);
}

#[test]
fn test_third_line_words_are_absent() {
    let renderer = builtin_renderer(config_without_background());
    let description = format!("{} zebra", vec!["lorem"; 30].join(" "));
    let doc = MenuDocument::new(
        vec![MenuEntry::new("Prato", description, 20.0)],
        FooterInfo::default(),
    );
    let layout = renderer.layout(&doc).unwrap();
    let row = &layout.rows[0];

    assert_eq!(row.description.len(), 2);
    assert!(row.description_truncated);
    assert!(row.description.iter().all(|line| !line.text.contains("zebra")));
    assert_eq!(row.height, 80.0);
}

#[test]
fn test_many_entries_overflow_but_render() {
    let renderer = builtin_renderer(config_without_background());
    let entries = (0..20)
        .map(|i| MenuEntry::new(format!("Item {}", i), "", i as f64))
        .collect();
    let doc = MenuDocument::new(entries, FooterInfo::default());

    let layout = renderer.layout(&doc).unwrap();
    assert!(layout.overflows);
    assert_eq!(layout.spacing, 15.0);
    assert_eq!(layout.start_y, layout.band.top);

    let image = renderer.render(&doc).unwrap();
    assert_eq!(image.height(), 1277);
}

#[test]
fn test_empty_menu_is_rejected() {
    let renderer = builtin_renderer(config_without_background());
    let err = renderer.render(&MenuDocument::default()).unwrap_err();
    assert!(matches!(err, MenuError::InvalidInput(_)));
}

// ─── Background ─────────────────────────────────────────────────

#[test]
fn test_missing_background_falls_back_to_gradient() {
    let mut config = MenuConfig::default();
    config.background.source = Some("/nonexistent/fundo.jpg".to_string());
    let image = builtin_renderer(config).render(&burger_and_pizza()).unwrap();

    let [r, g, b, a] = image.pixel(0, 0).unwrap();
    assert_near(r, 0xf8);
    assert_near(g, 0xf9);
    assert_near(b, 0xfa);
    assert_eq!(a, 255);
}

#[test]
fn test_background_image_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fundo.png");
    image::RgbaImage::from_pixel(32, 32, image::Rgba([200, 30, 40, 255]))
        .save(&path)
        .unwrap();

    let mut config = MenuConfig::default();
    config.background.source = Some(path.to_string_lossy().into_owned());
    let image = builtin_renderer(config).render(&burger_and_pizza()).unwrap();

    // Top-left corner is outside every panel.
    let [r, g, b, a] = image.pixel(0, 0).unwrap();
    assert_near(r, 200);
    assert_near(g, 30);
    assert_near(b, 40);
    assert_eq!(a, 255);
}

#[test]
fn test_panels_lighten_the_background() {
    let renderer = builtin_renderer(config_without_background());
    let doc = burger_and_pizza();
    let layout = renderer.layout(&doc).unwrap();
    let image = renderer.render(&doc).unwrap();

    // Builtin metrics draw no glyphs, so the panel center is plain fill.
    let panel = layout.rows[0].panel;
    let x = (panel.x + panel.width / 2.0) as u32;
    let y = (panel.y + panel.height / 2.0) as u32;
    let [r, _, _, _] = image.pixel(x, y).unwrap();
    let [bg, _, _, _] = image.pixel(5, y).unwrap();
    assert!(r > bg);
}

// ─── Determinism ────────────────────────────────────────────────

#[test]
fn test_rendering_is_deterministic() {
    let renderer = MenuRenderer::new(config_without_background(), FontContext::system());
    let doc = burger_and_pizza();
    let first = renderer.render(&doc).unwrap();
    let second = renderer.render(&doc).unwrap();
    assert_eq!(first.data(), second.data());
}

// ─── Glyph drawing ──────────────────────────────────────────────

/// Horizontal extent of the pixels in `xs × ys` that `is_ink` accepts.
fn ink_span(
    image: &menucanvas::CompositedImage,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
    is_ink: impl Fn([u8; 4], [u8; 4]) -> bool,
) -> Option<(u32, u32)> {
    let mut span: Option<(u32, u32)> = None;
    for y in ys {
        // The fallback gradient is constant along a row.
        let background = image.pixel(0, y).unwrap();
        for x in xs.clone() {
            if is_ink(image.pixel(x, y).unwrap(), background) {
                span = Some(match span {
                    Some((lo, hi)) => (lo.min(x), hi.max(x)),
                    None => (x, x),
                });
            }
        }
    }
    span
}

fn system_renderer() -> Option<MenuRenderer> {
    let fonts = FontContext::system();
    if !fonts.can_draw() {
        eprintln!("no system font installed; skipping glyph test");
        return None;
    }
    Some(MenuRenderer::new(config_without_background(), fonts))
}

#[test]
fn test_price_ink_is_right_aligned() {
    let Some(renderer) = system_renderer() else {
        return;
    };
    let doc = burger_and_pizza();
    let layout = renderer.layout(&doc).unwrap();
    let image = renderer.render(&doc).unwrap();

    for row in &layout.rows {
        let price = &row.price;
        let top = (price.baseline - price.style.font_size) as u32;
        let bottom = (price.baseline + price.style.font_size * 0.3) as u32;
        // Price red stands out from the white panel and the dark name.
        let (lo, hi) = ink_span(&image, 0..image.width(), top..bottom, |px, _| {
            px[0] as i32 - px[1] as i32 > 40
        })
        .expect("price glyphs drawn");

        assert!(hi as f64 <= price.x.ceil(), "ink ends at {hi}, anchor {}", price.x);
        assert!(price.x - (hi as f64) < 6.0);
        assert!(price.x - (lo as f64) > 30.0);
    }
}

#[test]
fn test_footer_ink_is_centered_on_columns() {
    let Some(renderer) = system_renderer() else {
        return;
    };
    let doc = burger_and_pizza();
    let layout = renderer.layout(&doc).unwrap();
    let image = renderer.render(&doc).unwrap();

    let width = image.width() as f64;
    let anchors = [width / 7.0, width / 2.7, width / 1.7];
    let bounds = [
        0,
        ((anchors[0] + anchors[1]) / 2.0) as u32,
        ((anchors[1] + anchors[2]) / 2.0) as u32,
        image.width(),
    ];

    for (i, cell) in layout.footer.iter().enumerate() {
        let value = &cell.value;
        assert_eq!(value.x, anchors[i]);
        let top = (value.baseline - value.style.font_size * 0.85) as u32;
        let bottom = ((value.baseline + value.style.font_size * 0.25) as u32).min(image.height());
        // Colored values differ strongly from the pale gradient; the white
        // labels above them do not.
        let (lo, hi) = ink_span(&image, bounds[i]..bounds[i + 1], top..bottom, |px, bg| {
            (0..3).any(|c| (px[c] as i32 - bg[c] as i32).abs() > 40)
        })
        .expect("footer value glyphs drawn");

        let center = (lo + hi + 1) as f64 / 2.0;
        assert!(
            (center - anchors[i]).abs() < 6.0,
            "{:?} centered at {center}, expected {}",
            value.text,
            anchors[i]
        );
    }
}

#[test]
fn test_malformed_gradient_color_still_renders() {
    // "#aébcd" is six bytes but not six hex digits.
    let mut config = MenuConfig::from_toml(
        "[background]\ngradient_top = \"#a\u{e9}bcd\"\ngradient_bottom = \"#a\u{e9}bcd\"\n",
    )
    .unwrap();
    config.background.source = None;

    let image = builtin_renderer(config).render(&burger_and_pizza()).unwrap();
    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 255]));
}

// ─── Provider → render ──────────────────────────────────────────

#[test]
fn test_provider_to_image() {
    let json = r#"[
        { "id": "old", "isActive": false, "menuItems": [
            { "name": "Velho", "price": 1.0 }
        ]},
        { "id": "cur", "isActive": true, "deliveryTax": 5,
          "deliveryDay": "Monday", "whatsappOrderDay": "Sunday",
          "whatsappOrderTime": "18:00",
          "createdAt": "2025-03-14T12:00:00Z",
          "menuItems": [
            { "name": "Burger", "description": "", "price": 10.0, "order": 0 },
            { "name": "Pizza", "description": "", "price": 35.5, "order": 1 }
        ]}
    ]"#;
    let store = JsonMenuStore::from_json(json).unwrap();
    let record = store.fetch_menu(None).unwrap();
    assert_eq!(record.id, "cur");
    assert_eq!(
        menucanvas::output::default_file_name(record.created_on()),
        "cardapio-2025-03-14.png"
    );

    let renderer = builtin_renderer(config_without_background());
    let document = record.to_document();
    let layout = renderer.layout(&document).unwrap();
    assert_eq!(layout.rows[0].name.text, "Pizza");
    assert_eq!(layout.footer[2].value.text, "R$ 5,00");

    let image = renderer.render_record(&record).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cardapio.png");
    image.save(&out).unwrap();

    assert_eq!(image::image_dimensions(&out).unwrap(), (1280, 1277));
}

#[test]
fn test_layout_serializes_for_inspection() {
    let renderer = builtin_renderer(config_without_background());
    let layout = renderer.layout(&burger_and_pizza()).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["rows"][0]["entryIndex"], 1);
    assert_eq!(json["spacing"], 35.0);
    assert!(json["startY"].is_number());
}

#[test]
fn test_config_file_drives_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menucanvas.toml");
    std::fs::write(
        &path,
        r##"
[canvas]
width = 320
height = 320

[background]
gradient_top = "#000000"
gradient_bottom = "#000000"

[fonts]
system = false
"##,
    )
    .unwrap();

    let mut config = MenuConfig::load(&path).unwrap();
    config.background.source = None;
    let renderer = MenuRenderer::from_config(config).unwrap();
    assert!(!renderer.font_context().can_draw());

    let image = renderer.render(&burger_and_pizza()).unwrap();
    assert_eq!((image.width(), image.height()), (320, 320));
    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 255]));
}
