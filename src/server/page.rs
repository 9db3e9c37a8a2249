//! HTML rendering of a [`View`].

use crate::{
    models::{DrawingSurface, Notice},
    sketch::view::{ImagePanel, OutputRegion, View},
};

pub const SPINNER_TEXT: &str = "Generating your sketch...";
pub const RESET_LABEL: &str = "Start Over";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
form.prompt { display: flex; gap: 0.5rem; align-items: center; margin-bottom: 1rem; }
form.prompt input[type=text] { flex: 1; padding: 0.4rem; }
.notice { padding: 0.6rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.notice.success { background: #e6f4ea; color: #1e4620; }
.notice.error { background: #fdecea; color: #611a15; }
.columns { display: flex; gap: 2rem; }
.columns > section { flex: 1; }
.toolbar { margin-top: 0.4rem; }
.spinner { color: #555; margin-bottom: 1rem; }
form.reset { margin-top: 2rem; }
canvas.doodle { border: 1px solid #ccc; touch-action: none; }
"#;

const SCRIPT: &str = r#"
(function () {
  var input = document.getElementById('prompt');
  var pending = null;
  if (input) {
    input.addEventListener('input', function () {
      clearTimeout(pending);
      pending = setTimeout(function () {
        fetch('/prompt', {
          method: 'POST',
          headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
          body: 'prompt=' + encodeURIComponent(input.value),
          redirect: 'manual'
        });
      }, 250);
    });
  }

  var form = document.querySelector('form.prompt');
  var spinner = document.getElementById('spinner');
  if (form) {
    form.addEventListener('submit', function () {
      var button = form.querySelector('button[type=submit]');
      if (button) { button.disabled = true; }
      if (spinner) { spinner.hidden = false; }
    });
  }

  var surface = document.querySelector('canvas.doodle');
  if (!surface) { return; }
  var ctx = surface.getContext('2d');
  var d = surface.dataset;
  function paintBackground() {
    ctx.fillStyle = d.background;
    ctx.fillRect(0, 0, surface.width, surface.height);
  }
  paintBackground();
  ctx.lineWidth = Number(d.strokeWidth);
  ctx.strokeStyle = d.strokeColor;
  ctx.fillStyle = d.fill;
  ctx.lineCap = 'round';
  ctx.lineJoin = 'round';

  var drawing = false;
  function point(e) {
    var r = surface.getBoundingClientRect();
    return [e.clientX - r.left, e.clientY - r.top];
  }
  surface.addEventListener('pointerdown', function (e) {
    drawing = true;
    var p = point(e);
    ctx.beginPath();
    ctx.moveTo(p[0], p[1]);
  });
  surface.addEventListener('pointermove', function (e) {
    if (!drawing) { return; }
    var p = point(e);
    ctx.lineTo(p[0], p[1]);
    ctx.stroke();
  });
  ['pointerup', 'pointerleave'].forEach(function (name) {
    surface.addEventListener(name, function () { drawing = false; });
  });

  var clear = document.getElementById('clear-doodle');
  if (clear) {
    clear.addEventListener('click', function () {
      ctx.clearRect(0, 0, surface.width, surface.height);
      paintBackground();
      ctx.fillStyle = d.fill;
    });
  }
})();
"#;

/// Escapes text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_page(view: &View) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(view.title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>✏️ {} 🖌️</h1>\n", escape(view.title)));

    html.push_str(&render_prompt_form(view));
    html.push_str(&render_spinner(view.busy));

    if let Some(notice) = &view.notice {
        html.push_str(&render_notice(notice));
    }

    if let Some(output) = &view.output {
        html.push_str(&render_output(output));
    }

    html.push_str(&format!(
        "<form class=\"reset\" method=\"post\" action=\"/reset\">\n<button type=\"submit\">🧹 {}</button>\n</form>\n",
        escape(RESET_LABEL)
    ));
    html.push_str(&format!("<script>{}</script>\n</body>\n</html>\n", SCRIPT));
    html
}

fn render_prompt_form(view: &View) -> String {
    let disabled = if view.busy { " disabled" } else { "" };
    format!(
        concat!(
            "<form class=\"prompt\" method=\"post\" action=\"/generate\">\n",
            "<label for=\"prompt\">🖋️ {label}</label>\n",
            "<input type=\"text\" id=\"prompt\" name=\"prompt\" value=\"{value}\">\n",
            "<button type=\"submit\"{disabled}>🔮 {button}</button>\n",
            "</form>\n"
        ),
        label = escape(view.prompt_label),
        value = escape(&view.prompt),
        disabled = disabled,
        button = escape(view.generate_label),
    )
}

fn render_spinner(busy: bool) -> String {
    let hidden = if busy { "" } else { " hidden" };
    format!(
        "<p class=\"spinner\" id=\"spinner\" role=\"status\"{}>🖼️ {}</p>\n",
        hidden,
        escape(SPINNER_TEXT)
    )
}

fn render_notice(notice: &Notice) -> String {
    let (class, icon) = match notice {
        Notice::Success(_) => ("success", "🎉 "),
        Notice::Error(_) => ("error", ""),
    };
    format!(
        "<div class=\"notice {}\" role=\"status\">{}{}</div>\n",
        class,
        icon,
        escape(notice.message())
    )
}

fn render_output(output: &OutputRegion) -> String {
    format!(
        "<div class=\"columns\">\n<section>\n{}</section>\n<section>\n<h2>🖍️ {}</h2>\n{}</section>\n</div>\n",
        render_image(&output.image),
        escape(output.doodle_header),
        render_canvas(&output.canvas)
    )
}

fn render_image(image: &ImagePanel) -> String {
    format!(
        concat!(
            "<figure>\n",
            "<img src=\"{src}\" alt=\"{caption}\" width=\"{width}\">\n",
            "<figcaption>🖼️ {caption}</figcaption>\n",
            "</figure>\n",
            "<a href=\"{href}\" download target=\"_blank\" rel=\"noopener\">🎁 {label}</a>\n"
        ),
        src = escape(&image.src),
        caption = escape(image.caption),
        width = image.width,
        href = escape(&image.download_href),
        label = escape(image.download_label),
    )
}

fn render_canvas(surface: &DrawingSurface) -> String {
    let toolbar = if surface.display_toolbar {
        "<div class=\"toolbar\"><button type=\"button\" id=\"clear-doodle\">Clear</button></div>\n"
    } else {
        ""
    };
    format!(
        concat!(
            "<canvas class=\"doodle\" id=\"{key}\" width=\"{width}\" height=\"{height}\" ",
            "data-mode=\"{mode}\" data-stroke-width=\"{stroke_width}\" ",
            "data-stroke-color=\"{stroke_color}\" data-fill=\"{fill}\" ",
            "data-background=\"{background}\"></canvas>\n",
            "{toolbar}"
        ),
        key = escape(&surface.key),
        width = surface.width,
        height = surface.height,
        mode = surface.drawing_mode.as_str(),
        stroke_width = surface.stroke_width,
        stroke_color = escape(&surface.stroke_color),
        fill = escape(&surface.fill_color),
        background = escape(&surface.background_color),
        toolbar = toolbar,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::{render, SessionState};

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn empty_session_has_form_but_no_output() {
        let html = render_page(&render(&SessionState::new()));
        assert!(html.contains("action=\"/generate\""));
        assert!(html.contains("Generate Sketch!"));
        assert!(!html.contains("<canvas"));
        assert!(!html.contains("<img "));
    }

    #[test]
    fn busy_session_disables_the_button() {
        let state = SessionState {
            in_flight: true,
            ..SessionState::default()
        };
        let html = render_page(&render(&state));
        assert!(html.contains("<button type=\"submit\" disabled>"));
        assert!(html.contains("id=\"spinner\" role=\"status\">🖼️ Generating your sketch..."));
    }

    #[test]
    fn idle_page_hides_spinner_and_offers_a_fresh_start() {
        let html = render_page(&render(&SessionState::new()));
        assert!(html.contains("id=\"spinner\" role=\"status\" hidden>"));
        assert!(html.contains("action=\"/reset\""));
        assert!(html.contains("Start Over"));
        assert!(html.contains("form.addEventListener('submit'"));
    }

    #[test]
    fn canvas_carries_the_pen_settings() {
        let state = SessionState {
            generated_image_reference: Some("https://example/img1.png".into()),
            ..SessionState::default()
        };
        let html = render_page(&render(&state));
        assert!(html.contains(r#"width="400" height="400""#));
        assert!(html.contains(r#"data-stroke-width="2""#));
        assert!(html.contains(r##"data-stroke-color="#000000""##));
        assert!(html.contains(r##"data-background="#FFFFFF""##));
        assert!(html.contains(r#"data-mode="freedraw""#));
        assert!(html.contains("Doodle on Your Sketch"));
        assert!(html.contains("id=\"clear-doodle\""));
    }
}
