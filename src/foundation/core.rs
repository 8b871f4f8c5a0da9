use crate::foundation::math::clamp_unit;

/// Viewport width (CSS pixels) at or below which a host is treated as mobile.
pub const MOBILE_MAX_VIEWPORT_WIDTH: f64 = 768.0;

/// Coarse cost class of the host device.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Phones and small touch tablets.
    Mobile,
    /// Everything else.
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify a host once at startup.
    ///
    /// A narrow viewport or a coarse (touch) primary pointer selects [`DeviceClass::Mobile`].
    pub fn detect(caps: HostCapabilities) -> Self {
        let narrow =
            caps.viewport_width.is_finite() && caps.viewport_width <= MOBILE_MAX_VIEWPORT_WIDTH;
        if narrow || caps.coarse_pointer {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// Host capabilities inspected once at startup.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostCapabilities {
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Whether the primary pointer is coarse (touch).
    pub coarse_pointer: bool,
}

/// Raw scroll geometry reported by the host for one scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top of the document, in pixels.
    pub scroll_top: f64,
    /// Full document height in pixels.
    pub document_height: f64,
    /// Visible viewport height in pixels.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Height that can actually be scrolled (`document - viewport`).
    pub fn scrollable_height(self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// Whether scrolling is possible at all.
    pub fn is_scrollable(self) -> bool {
        let h = self.scrollable_height();
        h.is_finite() && h > 0.0
    }

    /// Document scroll fraction in `[0, 1]`.
    ///
    /// Zero or negative scrollable height resolves to `0` (never `NaN` or infinity).
    pub fn fraction(self) -> f64 {
        if !self.is_scrollable() {
            return 0.0;
        }
        clamp_unit(self.scroll_top / self.scrollable_height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
