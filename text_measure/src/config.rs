// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::spans::PriorityOrder;
use crate::units::DisplayMetrics;

/// Options shared by every call on a [`TextLayoutManager`](crate::TextLayoutManager).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Density and font scale of the display.
    pub display: DisplayMetrics,
    /// Font size of fragments without one, in scalable points.
    pub default_font_size: f32,
    /// Font size fitting never goes below this, in density-independent points, unless the
    /// paragraph sets its own minimum.
    pub minimum_fit_font_size: f32,
    /// Number of content-keyed buffers kept in the layout cache.
    pub cache_capacity: usize,
    /// Used when a paragraph does not say whether to include font padding.
    pub include_font_padding: bool,
    /// Used when a paragraph does not say whether to fit its font size.
    pub adjust_font_size_to_fit: bool,
    /// How span priorities follow fragment order.
    pub priority_order: PriorityOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            display: DisplayMetrics::default(),
            default_font_size: 14.0,
            minimum_fit_font_size: 4.0,
            cache_capacity: 100,
            include_font_padding: true,
            adjust_font_size_to_fit: false,
            priority_order: PriorityOrder::Construction,
        }
    }
}

impl LayoutConfig {
    /// Sets the display metrics.
    #[must_use]
    pub fn with_display(mut self, display: DisplayMetrics) -> Self {
        self.display = display;
        self
    }

    /// Sets the default font size.
    #[must_use]
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Sets the minimum font size used by font fitting.
    #[must_use]
    pub fn with_minimum_fit_font_size(mut self, size: f32) -> Self {
        self.minimum_fit_font_size = size;
        self
    }

    /// Sets the capacity of the layout cache.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the default for including font padding.
    #[must_use]
    pub fn with_include_font_padding(mut self, include: bool) -> Self {
        self.include_font_padding = include;
        self
    }

    /// Sets the default for font size fitting.
    #[must_use]
    pub fn with_adjust_font_size_to_fit(mut self, adjust: bool) -> Self {
        self.adjust_font_size_to_fit = adjust;
        self
    }

    /// Sets the span priority order.
    #[must_use]
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }
}
