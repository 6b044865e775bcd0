use anyhow::Result;
use std::path::Path;

pub fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
        }
        None => {
            println!("{text}");
        }
    }
    Ok(())
}

/// Rasterize badge markup at `size`×`size` pixels.
#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, size: u32) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = size.max(1);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let scale = size as f32 / tree.size().width().max(1.0);
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _size: u32) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(all(test, feature = "png"))]
mod tests {
    use super::*;
    use crate::badge::BadgeRenderer;
    use crate::environment::Headless;
    use std::sync::Arc;

    #[test]
    fn rasterizes_a_badge() {
        let renderer = BadgeRenderer::with_environment(Arc::new(Headless)).unwrap();
        let svg = renderer
            .symbol("user", "blue-500", None)
            .unwrap()
            .svg()
            .unwrap();
        let path = std::env::temp_dir().join(format!("svbadge-test-{}.png", std::process::id()));
        write_output_png(&svg, &path, 96).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
