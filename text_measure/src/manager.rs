// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry points: measuring attributed strings and creating layouts for them.

use std::sync::Arc;

use crate::attachments::{position_attachments, AttachmentPosition};
use crate::backend::{SimpleBackend, SimpleMetrics, TextBackend};
use crate::cache::{CacheKey, LayoutCache};
use crate::config::LayoutConfig;
use crate::fit::FontFitAdjuster;
use crate::layout::{
    build, measured_size, resolve_alignment, resolve_gravity, Alignment, Gravity, Layout,
    LayoutRequest,
};
use crate::model::{AttributedString, CacheId, ParagraphAttributes};
use crate::spans::{SpanBuilder, StyledText};
use crate::units::{MeasureMode, Size};
use crate::wire::MapBuffer;
use crate::Error;

/// The result of [`TextLayoutManager::measure`], in density-independent points.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Size of the text.
    pub size: Size,
    /// Positions of the attachments that are shown, in buffer order.
    pub attachments: Vec<AttachmentPosition>,
}

/// A layout ready to be drawn.
#[derive(Clone, Debug)]
pub struct LayoutHandle {
    /// The text that was laid out, with fitted font sizes.
    pub text: Arc<StyledText>,
    /// Lines and their metrics, in pixels.
    pub layout: Layout,
    /// Alignment the lines were positioned with.
    pub alignment: Alignment,
    /// Physical gravity matching `alignment`.
    pub gravity: Gravity,
}

/// Metrics of one laid out line, in density-independent points.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs, reason = "Fields are named after the metric they carry.")]
pub struct LineInfo {
    pub text: String,
    /// Left edge of the visible content.
    pub x: f32,
    /// Top of the line.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub ascender: f32,
    pub descender: f32,
    pub cap_height: f32,
    pub x_height: f32,
}

/// Measures and lays out attributed strings.
///
/// The manager owns its layout cache; share one manager between threads to share the
/// cache.
#[derive(Debug)]
pub struct TextLayoutManager<B: TextBackend = SimpleBackend> {
    backend: B,
    cache: LayoutCache,
    config: LayoutConfig,
}

impl Default for TextLayoutManager {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl TextLayoutManager {
    /// Creates a manager using [`SimpleBackend`].
    pub fn new(config: LayoutConfig) -> Self {
        let default_font_size = config.display.sp_to_px(config.default_font_size);
        let backend =
            SimpleBackend::new(SimpleMetrics::default()).with_default_font_size(default_font_size);
        Self::with_backend(backend, config)
    }
}

impl<B: TextBackend> TextLayoutManager<B> {
    /// Creates a manager measuring through `backend`.
    pub fn with_backend(backend: B, config: LayoutConfig) -> Self {
        Self {
            backend,
            cache: LayoutCache::new(config.cache_capacity),
            config,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The layout cache.
    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn span_builder(&self) -> SpanBuilder {
        SpanBuilder::new(
            self.config.display,
            self.config.default_font_size,
            self.config.priority_order,
        )
    }

    /// Flattens `attributed` and installs it in the cache under `id`, replacing any
    /// buffer installed before.
    pub fn set_cached_buffer(
        &self,
        id: CacheId,
        attributed: &AttributedString,
    ) -> Result<Arc<StyledText>, Error> {
        let text = self.span_builder().flatten(&attributed.fragments)?;
        Ok(self.cache.put(CacheKey::Id(id), text))
    }

    /// Removes the buffer installed under `id`. Returns `false` if there was none.
    pub fn delete_cached_buffer(&self, id: CacheId) -> bool {
        self.cache.remove(&CacheKey::Id(id)).is_some()
    }

    /// Returns the flattened buffer of `attributed`, from the cache when possible.
    ///
    /// A buffer installed under the string's cache id is used first. Otherwise the
    /// fragments are flattened through the content-keyed cache; lookups never install
    /// anything under an id. A string referring to a cache id without carrying fragments
    /// fails with [`Error::StaleCacheReference`] when nothing is installed under that id.
    pub fn styled_text(&self, attributed: &AttributedString) -> Result<Arc<StyledText>, Error> {
        if let Some(id) = attributed.cache_key {
            if let Some(text) = self.cache.get(&CacheKey::Id(id)) {
                return Ok(text);
            }
            if attributed.fragments.is_empty() {
                return Err(Error::StaleCacheReference(id));
            }
        }
        let key = self.cache.content_key(&attributed.fragments);
        self.cache
            .get_or_build(key, || self.span_builder().flatten(&attributed.fragments))
    }

    fn prepare(
        &self,
        attributed: &AttributedString,
        paragraph: &ParagraphAttributes,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Result<(Arc<StyledText>, Layout, Alignment), Error> {
        let text = self.styled_text(attributed)?;
        let display = self.config.display;
        let alignment = resolve_alignment(&attributed.fragments, text.as_str());
        let request = LayoutRequest {
            width: display.dip_to_px(width),
            width_mode,
            include_font_padding: paragraph
                .include_font_padding
                .unwrap_or(self.config.include_font_padding),
            break_strategy: paragraph.break_strategy,
            hyphenation: paragraph.hyphenation_frequency,
            alignment,
            max_lines: paragraph.max_lines.filter(|max| *max > 0),
            ellipsize: paragraph.ellipsize_mode,
        };

        let adjust = paragraph
            .adjust_font_size_to_fit
            .unwrap_or(self.config.adjust_font_size_to_fit);
        if adjust {
            let adjuster = FontFitAdjuster::for_paragraph(
                paragraph,
                display,
                self.config.minimum_fit_font_size,
            );
            let outcome = adjuster.fit(
                &self.backend,
                &text,
                &request,
                display.dip_to_px(height),
                height_mode,
            );
            tracing::debug!(
                iterations = outcome.iterations,
                initial = outcome.initial_font_size,
                fitted = outcome.final_font_size,
                "fitted font size"
            );
            Ok((Arc::new(outcome.text), outcome.layout, alignment))
        } else {
            let layout = build(&self.backend, &text, &request);
            Ok((text, layout, alignment))
        }
    }

    /// Measures `attributed` under the given constraints.
    ///
    /// Dimensions are in density-independent points.
    pub fn measure(
        &self,
        attributed: &AttributedString,
        paragraph: &ParagraphAttributes,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Result<Measurement, Error> {
        let (text, layout, _) =
            self.prepare(attributed, paragraph, width, width_mode, height, height_mode)?;
        let display = self.config.display;
        let size_px = measured_size(
            &layout,
            display.dip_to_px(width),
            width_mode,
            display.dip_to_px(height),
            height_mode,
        );
        let attachments = position_attachments(&layout, &text, size_px.width, display);
        let size = Size::new(
            display.px_to_dip(size_px.width),
            display.px_to_dip(size_px.height),
        );
        tracing::debug!(
            len = text.len(),
            width_px = size_px.width,
            height_px = size_px.height,
            width = size.width,
            height = size.height,
            attachments = attachments.len(),
            "measured text"
        );
        Ok(Measurement { size, attachments })
    }

    /// Decodes wire buffers and measures them.
    pub fn measure_map_buffer(
        &self,
        attributed: &MapBuffer,
        paragraph: &MapBuffer,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Result<Measurement, Error> {
        let attributed = AttributedString::from_map_buffer(attributed)?;
        let paragraph = ParagraphAttributes::from_map_buffer(paragraph)?;
        self.measure(&attributed, &paragraph, width, width_mode, height, height_mode)
    }

    /// Lays out `attributed` at exactly `width`.
    ///
    /// Font fitting treats `height` as unconstrained, so only the line limit shrinks text.
    pub fn create_layout(
        &self,
        attributed: &AttributedString,
        paragraph: &ParagraphAttributes,
        width: f32,
        height: f32,
    ) -> Result<LayoutHandle, Error> {
        let (text, layout, alignment) = self.prepare(
            attributed,
            paragraph,
            width,
            MeasureMode::Exactly,
            height,
            MeasureMode::Undefined,
        )?;
        let gravity = resolve_gravity(alignment, layout.direction());
        Ok(LayoutHandle {
            text,
            layout,
            alignment,
            gravity,
        })
    }

    /// Returns the metrics of every line of the layout of `attributed`.
    pub fn measure_lines(
        &self,
        attributed: &AttributedString,
        paragraph: &ParagraphAttributes,
        width: f32,
        height: f32,
    ) -> Result<Vec<LineInfo>, Error> {
        let handle = self.create_layout(attributed, paragraph, width, height)?;
        let display = self.config.display;
        Ok(handle
            .layout
            .lines()
            .map(|line| {
                let metrics = line.metrics();
                LineInfo {
                    text: line.text().to_owned(),
                    x: display.px_to_dip(line.left()),
                    y: display.px_to_dip(metrics.min_coord),
                    width: display.px_to_dip(line.width()),
                    height: display.px_to_dip(metrics.size()),
                    ascender: display.px_to_dip(metrics.ascent),
                    descender: display.px_to_dip(metrics.descent),
                    cap_height: display.px_to_dip(metrics.cap_height),
                    x_height: display.px_to_dip(metrics.x_height),
                }
            })
            .collect())
    }

    /// Returns the baseline of the last shown line of `attributed`, or 0 for a layout
    /// without lines.
    pub fn last_baseline(
        &self,
        attributed: &AttributedString,
        paragraph: &ParagraphAttributes,
        width: f32,
        height: f32,
    ) -> Result<f32, Error> {
        let handle = self.create_layout(attributed, paragraph, width, height)?;
        let layout = &handle.layout;
        let baseline = layout
            .rendered_line_count()
            .checked_sub(1)
            .and_then(|last| layout.get(last))
            .map_or(0.0, |line| line.metrics().baseline);
        Ok(self.config.display.px_to_dip(baseline))
    }
}
