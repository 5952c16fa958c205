// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::{build, LayoutRequest};
use crate::{
    AttributedString, Fragment, Layout, LayoutConfig, MeasureMode, Measurement,
    ParagraphAttributes, SpanBuilder, StyledText, TextLayoutManager,
};

/// A manager with the reference backend plus shortcuts for the common test steps.
pub(crate) struct TestEnv {
    pub(crate) manager: TextLayoutManager,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub(crate) fn with_config(config: LayoutConfig) -> Self {
        Self {
            manager: TextLayoutManager::new(config),
        }
    }

    pub(crate) fn flatten(&self, fragments: &[Fragment]) -> StyledText {
        let config = self.manager.config();
        SpanBuilder::new(
            config.display,
            config.default_font_size,
            config.priority_order,
        )
        .flatten(fragments)
        .expect("well-formed fragments flatten")
    }

    pub(crate) fn layout(&self, text: &str, request: &LayoutRequest) -> Layout {
        let styled = self.flatten(&[Fragment::new(text)]);
        build(self.manager.backend(), &styled, request)
    }

    pub(crate) fn measure(
        &self,
        fragments: Vec<Fragment>,
        paragraph: &ParagraphAttributes,
        width: f32,
        width_mode: MeasureMode,
    ) -> Measurement {
        self.manager
            .measure(
                &AttributedString::new(fragments),
                paragraph,
                width,
                width_mode,
                0.0,
                MeasureMode::Undefined,
            )
            .expect("measurement succeeds")
    }
}

/// A request constrained to at most `width` pixels.
pub(crate) fn at_most(width: f32) -> LayoutRequest {
    LayoutRequest {
        width,
        width_mode: MeasureMode::AtMost,
        ..LayoutRequest::default()
    }
}
