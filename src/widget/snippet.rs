//! Snippet rendering.
//!
//! The output is built line by line from fixed text plus escaped values so
//! that the same config always renders the same bytes.

use tracing::debug;

use super::escape::{css_color, css_pixels, js_string, url_component};
use super::{MIN_PHONE_DIGITS, WidgetConfig};

/// DOM id of the injected widget root. The script refuses to run twice on a
/// page where this id already exists.
pub const ROOT_ID: &str = "stitchbyte-wa-widget";

/// Returned in place of a snippet when the phone number is unusable.
pub const PLACEHOLDER_SNIPPET: &str =
    "<!-- Enter a valid WhatsApp phone number (at least 10 digits) to generate your widget code -->";

const WHATSAPP_ICON: &str = r#"<svg viewBox="0 0 32 32" aria-hidden="true"><path d="M16 3C8.8 3 3 8.6 3 15.6c0 2.5.8 4.9 2.1 6.9L3.4 29l6.7-1.7c1.8 1 3.8 1.5 5.9 1.5 7.2 0 13-5.6 13-12.6S23.2 3 16 3zm0 23.2c-1.9 0-3.7-.5-5.3-1.5l-.4-.2-4 1 1.1-3.8-.3-.4c-1.1-1.7-1.7-3.6-1.7-5.6C5.4 10 10.2 5.4 16 5.4S26.6 10 26.6 15.6 21.8 26.2 16 26.2zm5.8-7.9c-.3-.2-1.9-.9-2.2-1s-.5-.2-.7.2-.8 1-1 1.2-.4.2-.7.1c-.3-.2-1.3-.5-2.6-1.6-1-.8-1.6-1.9-1.8-2.2s0-.5.1-.6l.5-.6c.2-.2.2-.4.3-.6s0-.4 0-.6-.7-1.7-1-2.3c-.3-.6-.5-.5-.7-.5h-.6c-.2 0-.6.1-.9.4s-1.2 1.1-1.2 2.7 1.2 3.1 1.4 3.3c.2.2 2.4 3.6 5.8 5 .8.4 1.4.6 1.9.7.8.3 1.5.2 2.1.1.6-.1 1.9-.8 2.2-1.5.3-.7.3-1.4.2-1.5-.1-.2-.3-.2-.6-.4z"/></svg>"#;

/// Strip everything except ASCII digits from a phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// The `wa.me` link the call-to-action opens, or `None` when the phone number
/// has too few digits.
pub fn deep_link(config: &WidgetConfig) -> Option<String> {
    let digits = normalize_phone(&config.phone_number);
    if digits.len() < MIN_PHONE_DIGITS {
        return None;
    }
    Some(format!(
        "https://wa.me/{}?text={}",
        digits,
        url_component(&config.welcome_message)
    ))
}

/// Whether `snippet` is the placeholder comment rather than installable code.
pub fn is_placeholder_snippet(snippet: &str) -> bool {
    snippet == PLACEHOLDER_SNIPPET
}

/// Render the embeddable widget for `config`.
///
/// Returns [`PLACEHOLDER_SNIPPET`] when the phone number has fewer than
/// [`MIN_PHONE_DIGITS`] digits.
pub fn generate(config: &WidgetConfig) -> String {
    let Some(link) = deep_link(config) else {
        debug!(
            phone = %config.phone_number,
            "phone number too short, returning placeholder snippet"
        );
        return PLACEHOLDER_SNIPPET.to_string();
    };

    let mut lines: Vec<String> = Vec::new();

    lines.push("<!-- StitchByte WhatsApp chat widget -->".to_string());
    lines.push("<script>".to_string());
    lines.push("(function () {".to_string());
    lines.push(format!("  var ROOT_ID = {};", js_string(ROOT_ID)));
    lines.push("  if (document.getElementById(ROOT_ID)) {".to_string());
    lines.push("    return;".to_string());
    lines.push("  }".to_string());
    lines.push(String::new());

    push_settings(&mut lines, config, &link);
    lines.push(String::new());

    lines.push("  var css = [".to_string());
    let rules = style_rules(config);
    let last = rules.len().saturating_sub(1);
    for (i, rule) in rules.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        lines.push(format!("    {}{}", js_string(rule), sep));
    }
    lines.push("  ].join(\"\\n\");".to_string());
    lines.push(String::new());

    push_mount(&mut lines);

    lines.push("})();".to_string());
    lines.push("</script>".to_string());

    debug!(bytes = lines.iter().map(|l| l.len() + 1).sum::<usize>(), "widget snippet generated");

    lines.join("\n")
}

fn push_settings(lines: &mut Vec<String>, config: &WidgetConfig, link: &str) {
    let entries = [
        ("brandName", js_string(&config.brand_name)),
        ("brandSubtitle", js_string(&config.brand_subtitle)),
        ("brandImageUrl", js_string(config.brand_image_url.trim())),
        ("welcomeMessage", js_string(&config.welcome_message)),
        ("ctaText", js_string(&config.cta_text)),
        ("link", js_string(link)),
        ("openByDefault", config.open_by_default.to_string()),
        ("openOnMobile", config.open_on_mobile.to_string()),
        ("reopenAfter", js_string(&config.reopen_after)),
    ];

    lines.push("  var settings = {".to_string());
    let last = entries.len() - 1;
    for (i, (key, value)) in entries.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        lines.push(format!("    {}: {}{}", key, value, sep));
    }
    lines.push("  };".to_string());
}

/// CSS rules scoped to the widget root. Horizontal placement uses only the
/// configured side.
fn style_rules(config: &WidgetConfig) -> Vec<String> {
    let root = format!("#{}", ROOT_ID);
    let side = config.position.side();
    let color = css_color(&config.brand_color);
    let bottom = css_pixels(&config.margin_bottom);
    let margin = css_pixels(config.side_margin());
    let radius = css_pixels(&config.border_radius);

    vec![
        format!(
            "{root} {{ position: fixed; bottom: {bottom}px; {side}: {margin}px; z-index: 2147483000; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }}"
        ),
        format!(
            "{root} .sb-launcher {{ width: 60px; height: 60px; border-radius: 50%; border: none; background: {color}; cursor: pointer; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.25); display: flex; align-items: center; justify-content: center; }}"
        ),
        format!("{root} .sb-launcher svg {{ width: 32px; height: 32px; fill: #fff; }}"),
        format!(
            "{root} .sb-panel {{ position: absolute; bottom: 76px; {side}: 0; width: 320px; max-width: calc(100vw - 40px); background: #fff; border-radius: {radius}px; box-shadow: 0 8px 24px rgba(0, 0, 0, 0.2); overflow: hidden; display: none; }}"
        ),
        format!("{root} .sb-panel.sb-open {{ display: block; }}"),
        format!(
            "{root} .sb-header {{ background: {color}; color: #fff; padding: 16px; display: flex; align-items: center; gap: 12px; }}"
        ),
        format!(
            "{root} .sb-avatar {{ width: 44px; height: 44px; border-radius: 50%; object-fit: cover; background: rgba(255, 255, 255, 0.2); }}"
        ),
        format!("{root} .sb-title {{ flex: 1; min-width: 0; }}"),
        format!("{root} .sb-name {{ font-weight: 600; font-size: 16px; }}"),
        format!("{root} .sb-subtitle {{ font-size: 12px; opacity: 0.85; }}"),
        format!(
            "{root} .sb-close {{ background: none; border: none; color: #fff; font-size: 22px; line-height: 1; cursor: pointer; }}"
        ),
        format!("{root} .sb-body {{ padding: 16px; background: #ece5dd; }}"),
        format!(
            "{root} .sb-message {{ background: #fff; border-radius: 8px; padding: 10px 12px; margin-bottom: 16px; font-size: 14px; color: #303030; white-space: pre-line; }}"
        ),
        format!(
            "{root} .sb-cta {{ display: block; width: 100%; padding: 12px; border: none; border-radius: 24px; background: {color}; color: #fff; font-size: 14px; font-weight: 600; cursor: pointer; }}"
        ),
    ]
}

/// The DOM-building half of the script. It reads only from `settings` and
/// `css`, so it is the same for every config.
fn push_mount(lines: &mut Vec<String>) {
    const MOUNT: &[&str] = &[
        "  function el(tag, className) {",
        "    var node = document.createElement(tag);",
        "    if (className) {",
        "      node.className = className;",
        "    }",
        "    return node;",
        "  }",
        "",
        "  function mount() {",
        "    if (document.getElementById(ROOT_ID)) {",
        "      return;",
        "    }",
        "",
        "    var style = el(\"style\");",
        "    style.id = ROOT_ID + \"-style\";",
        "    style.textContent = css;",
        "    document.head.appendChild(style);",
        "",
        "    var root = el(\"div\");",
        "    root.id = ROOT_ID;",
        "    root.setAttribute(\"data-reopen-after\", settings.reopenAfter);",
        "",
        "    var panel = el(\"div\", \"sb-panel\");",
        "    var header = el(\"div\", \"sb-header\");",
        "    if (settings.brandImageUrl) {",
        "      var avatar = el(\"img\", \"sb-avatar\");",
        "      avatar.src = settings.brandImageUrl;",
        "      avatar.alt = settings.brandName;",
        "      header.appendChild(avatar);",
        "    }",
        "    var title = el(\"div\", \"sb-title\");",
        "    var name = el(\"div\", \"sb-name\");",
        "    name.textContent = settings.brandName;",
        "    var subtitle = el(\"div\", \"sb-subtitle\");",
        "    subtitle.textContent = settings.brandSubtitle;",
        "    title.appendChild(name);",
        "    title.appendChild(subtitle);",
        "    header.appendChild(title);",
        "    var close = el(\"button\", \"sb-close\");",
        "    close.type = \"button\";",
        "    close.setAttribute(\"aria-label\", \"Close chat\");",
        "    close.textContent = \"\\u00D7\";",
        "    header.appendChild(close);",
        "",
        "    var body = el(\"div\", \"sb-body\");",
        "    var message = el(\"div\", \"sb-message\");",
        "    message.textContent = settings.welcomeMessage;",
        "    var cta = el(\"button\", \"sb-cta\");",
        "    cta.type = \"button\";",
        "    cta.textContent = settings.ctaText;",
        "    body.appendChild(message);",
        "    body.appendChild(cta);",
        "",
        "    panel.appendChild(header);",
        "    panel.appendChild(body);",
        "",
        "    var launcher = el(\"button\", \"sb-launcher\");",
        "    launcher.type = \"button\";",
        "    launcher.setAttribute(\"aria-label\", \"Chat with us on WhatsApp\");",
    ];
    const EVENTS: &[&str] = &[
        "",
        "    launcher.addEventListener(\"click\", function () {",
        "      panel.classList.toggle(\"sb-open\");",
        "    });",
        "    close.addEventListener(\"click\", function () {",
        "      panel.classList.remove(\"sb-open\");",
        "    });",
        "    cta.addEventListener(\"click\", function () {",
        "      window.open(settings.link, \"_blank\", \"noopener,noreferrer\");",
        "    });",
        "",
        "    root.appendChild(panel);",
        "    root.appendChild(launcher);",
        "    document.body.appendChild(root);",
        "",
        "    var isMobile = window.matchMedia && window.matchMedia(\"(max-width: 768px)\").matches;",
        "    if (settings.openByDefault && (!isMobile || settings.openOnMobile)) {",
        "      panel.classList.add(\"sb-open\");",
        "    }",
        "  }",
        "",
        "  if (document.readyState === \"loading\") {",
        "    document.addEventListener(\"DOMContentLoaded\", mount);",
        "  } else {",
        "    mount();",
        "  }",
    ];

    lines.extend(MOUNT.iter().map(|l| l.to_string()));
    lines.push(format!(
        "    launcher.innerHTML = {};",
        js_string(WHATSAPP_ICON)
    ));
    lines.extend(EVENTS.iter().map(|l| l.to_string()));
}
