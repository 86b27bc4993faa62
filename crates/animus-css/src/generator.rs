//! Generator strategies selected by [`GeneratorMode`].

use animus_config::GeneratorMode;
use tracing::info;

use crate::assembler::{
    assemble, generate_layered_css, generate_legacy_css, AssemblyOptions, Emission,
    GeneratedCss, GenerationInput,
};
use crate::error::Result;
use crate::minify::minify_css;
use crate::render::CssWriter;

pub trait StyleGenerator {
    fn mode(&self) -> GeneratorMode;

    fn generate(&self, input: &GenerationInput<'_>) -> Result<GeneratedCss>;
}

/// Extracts every component rule into the stylesheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGenerator;

impl StyleGenerator for StaticGenerator {
    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Static
    }

    fn generate(&self, input: &GenerationInput<'_>) -> Result<GeneratedCss> {
        if input.config.layered {
            generate_layered_css(input)
        } else {
            generate_legacy_css(input)
        }
    }
}

/// Emits the theme's custom properties and the runtime metadata only.
///
/// Component rules are computed by the renderer, so no component or atomic
/// rule is written and the metadata names classes the stylesheet does not
/// contain.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeGenerator;

impl StyleGenerator for RuntimeGenerator {
    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Runtime
    }

    fn generate(&self, input: &GenerationInput<'_>) -> Result<GeneratedCss> {
        let _span = tracing::info_span!("generate_runtime_css").entered();

        let emission = if input.config.layered {
            Emission::Layered
        } else {
            Emission::Legacy
        };
        let mut assembly = assemble(
            input,
            AssemblyOptions {
                emission,
                atomics: false,
                declare_theme: true,
            },
        )?;

        let mut writer = CssWriter::new();
        writer.rules(&assembly.root_rules());
        let mut css = writer.finish();

        let mut diagnostics = assembly.ctx.take_diagnostics();
        if input.config.minify {
            let (minified, failure) = minify_css(&css);
            css = minified;
            diagnostics.extend(failure);
        }

        info!(
            components = assembly.metadata.len(),
            bytes = css.len(),
            "generated runtime theme stylesheet"
        );

        Ok(GeneratedCss {
            css,
            used_variables: assembly.ctx.theme.used_variables(),
            metadata: assembly.metadata,
            atomics: Vec::new(),
            diagnostics,
        })
    }
}

/// Generator for a configured mode.
pub fn generator_for(mode: GeneratorMode) -> Box<dyn StyleGenerator> {
    match mode {
        GeneratorMode::Static => Box::new(StaticGenerator),
        GeneratorMode::Runtime => Box::new(RuntimeGenerator),
    }
}
