use serde::Serialize;

use crate::{
    models::{DrawingSurface, Notice},
    sketch::state::SessionState,
};

pub const PAGE_TITLE: &str = "Stylus Generative Sketch Maker";
pub const PROMPT_LABEL: &str = "Type your sketch idea here:";
pub const GENERATE_LABEL: &str = "Generate Sketch!";
pub const IMAGE_CAPTION: &str = "Your Generated Sketch";
pub const DOWNLOAD_LABEL: &str = "Download Sketch";
pub const DOODLE_HEADER: &str = "Doodle on Your Sketch";
pub const IMAGE_WIDTH: u32 = 400;

/// Framework-neutral description of the page for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub title: &'static str,
    pub prompt_label: &'static str,
    pub prompt: String,
    pub generate_label: &'static str,
    pub busy: bool,
    pub notice: Option<Notice>,
    pub output: Option<OutputRegion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRegion {
    pub image: ImagePanel,
    pub doodle_header: &'static str,
    pub canvas: DrawingSurface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePanel {
    pub src: String,
    pub caption: &'static str,
    pub width: u32,
    pub download_href: String,
    pub download_label: &'static str,
}

pub fn render(state: &SessionState) -> View {
    let output = state
        .generated_image_reference
        .as_ref()
        .map(|reference| OutputRegion {
            image: ImagePanel {
                src: reference.clone(),
                caption: IMAGE_CAPTION,
                width: IMAGE_WIDTH,
                download_href: reference.clone(),
                download_label: DOWNLOAD_LABEL,
            },
            doodle_header: DOODLE_HEADER,
            canvas: DrawingSurface::default(),
        });

    View {
        title: PAGE_TITLE,
        prompt_label: PROMPT_LABEL,
        prompt: state.prompt.clone(),
        generate_label: GENERATE_LABEL,
        busy: state.in_flight,
        notice: state.notice.clone(),
        output,
    }
}
