//! ffmpeg filter-graph construction. Pure string building, no I/O.

/// Portrait social canvas.
pub const CANVAS_W: u32 = 1080;
pub const CANVAS_H: u32 = 1350;

/// Watermark width relative to canvas width.
pub const WATERMARK_RELATIVE_WIDTH: f64 = 0.16;
/// Watermark margin from the bottom-right edges, in pixels.
pub const WATERMARK_MARGIN: u32 = 28;

/// Output pad label of the full filter graph.
pub const OUT_LABEL: &str = "out";

/// Grading fragment for a visual variant, `None` for unknown names.
/// The `"none"` variant maps to an empty fragment.
pub fn variant_filter(variant: &str) -> Option<&'static str> {
    match variant {
        "none" => Some(""),
        "contrast_boost" => Some("eq=contrast=1.12:brightness=0.02:saturation=1.05"),
        "warm_tone" => Some("eq=saturation=1.08,colorbalance=rs=0.05:gs=0.03:bs=-0.02"),
        "cool_tone" => Some("eq=saturation=1.05,colorbalance=rs=-0.03:gs=0.01:bs=0.05"),
        "golden_hour" => Some("drawbox=0:0:iw:ih:color=0xc99e67@0.08:t=fill,eq=saturation=1.03"),
        "vintage_film" => Some("curves=vintage,eq=contrast=1.05:saturation=0.9"),
        "high_key" => Some("eq=brightness=0.08:contrast=0.9:saturation=1.1"),
        "low_key" => Some("eq=brightness=-0.08:contrast=1.2:saturation=0.9"),
        _ => None,
    }
}

/// Processing fragment for a post-processing effect, `None` for unknown
/// names. The `"none"` effect maps to an empty fragment.
pub fn effect_filter(effect: &str) -> Option<&'static str> {
    match effect {
        "none" => Some(""),
        "cinematic_crop" => Some("crop=iw*0.8:ih*0.9,scale=1080:1350"),
        "motion_blur" => Some("gblur=sigma=0.8"),
        "bokeh_effect" => Some("boxblur=2:1"),
        "film_grain" => Some("noise=alls=20:allf=t+u"),
        "light_leak" => Some("drawbox=0:0:iw:ih:color=0xffddaa@0.15:t=fill"),
        "color_pop" => Some("hue=s=2"),
        _ => None,
    }
}

/// Build the complete `-filter_complex` graph: cover-fit the source to the
/// canvas with a subtle sharpen, apply effect → variant → color grading,
/// then overlay the watermark bottom-right.
///
/// Unknown variant/effect names degrade to pass-through rather than
/// failing the post.
pub fn build_filter_complex(variant: &str, effect: &str, color_filter: &str) -> String {
    let chain_base = format!(
        "[0:v]scale={CANVAS_W}:{CANVAS_H}:force_original_aspect_ratio=increase,\
         crop={CANVAS_W}:{CANVAS_H},unsharp=5:5:0.6:5:5:0.0[base]"
    );

    let mut procs: Vec<&str> = Vec::new();
    if let Some(f) = effect_filter(effect).filter(|f| !f.is_empty()) {
        procs.push(f);
    }
    if let Some(f) = variant_filter(variant).filter(|f| !f.is_empty()) {
        procs.push(f);
    }
    if !color_filter.is_empty() {
        procs.push(color_filter);
    }
    let proc_part = if procs.is_empty() {
        "null".to_string()
    } else {
        procs.join(",")
    };
    let chain_proc = format!("[base]{proc_part}[proc]");

    let wm_width = (CANVAS_W as f64 * WATERMARK_RELATIVE_WIDTH) as u32;
    let chain_wm = format!("[1:v]scale={wm_width}:-1[wm]");
    let chain_overlay = format!(
        "[proc][wm]overlay=x=main_w-overlay_w-{WATERMARK_MARGIN}:\
         y=main_h-overlay_h-{WATERMARK_MARGIN}[{OUT_LABEL}]"
    );

    [chain_base, chain_proc, chain_wm, chain_overlay].join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_variants_have_fragments() {
        for v in [
            "none",
            "contrast_boost",
            "warm_tone",
            "cool_tone",
            "golden_hour",
            "vintage_film",
            "high_key",
            "low_key",
        ] {
            assert!(variant_filter(v).is_some(), "missing variant {v}");
        }
        assert!(variant_filter("sepia_dream").is_none());
    }

    #[test]
    fn known_effects_have_fragments() {
        for e in [
            "none",
            "cinematic_crop",
            "motion_blur",
            "bokeh_effect",
            "film_grain",
            "light_leak",
            "color_pop",
        ] {
            assert!(effect_filter(e).is_some(), "missing effect {e}");
        }
        assert!(effect_filter("vhs").is_none());
    }

    #[test]
    fn graph_contains_canvas_and_watermark_chains() {
        let graph = build_filter_complex("none", "none", "");
        assert!(graph.contains("scale=1080:1350"));
        assert!(graph.contains("crop=1080:1350"));
        assert!(graph.contains("[1:v]scale=172:-1[wm]")); // 1080 * 0.16
        assert!(graph.contains("overlay=x=main_w-overlay_w-28"));
        assert!(graph.ends_with("[out]"));
    }

    #[test]
    fn passthrough_chain_uses_null_filter() {
        let graph = build_filter_complex("none", "none", "");
        assert!(graph.contains("[base]null[proc]"));
    }

    #[test]
    fn processing_order_is_effect_then_variant_then_color() {
        let graph = build_filter_complex("low_key", "film_grain", "eq=saturation=0.9");
        let proc = graph
            .split(';')
            .find(|part| part.starts_with("[base]"))
            .unwrap();
        let grain = proc.find("noise=alls=20").unwrap();
        let variant = proc.find("eq=brightness=-0.08").unwrap();
        let color = proc.find("eq=saturation=0.9").unwrap();
        assert!(grain < variant && variant < color);
    }

    #[test]
    fn unknown_names_degrade_to_passthrough() {
        let graph = build_filter_complex("mystery", "mystery", "");
        assert!(graph.contains("[base]null[proc]"));
    }

    #[test]
    fn color_only_chain() {
        let graph = build_filter_complex("none", "none", "curves=blue='0/0 0.5/0.58 1/1'");
        assert!(graph.contains("[base]curves=blue='0/0 0.5/0.58 1/1'[proc]"));
    }

    #[test]
    fn graph_has_four_semicolon_separated_chains() {
        let graph = build_filter_complex("warm_tone", "color_pop", "eq=brightness=0.03");
        assert_eq!(graph.split(';').count(), 4);
    }
}
