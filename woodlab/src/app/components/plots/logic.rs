use std::time::{SystemTime, UNIX_EPOCH};

use app_core::backend::{BackendLink, RequestSender};

use crate::api::PlotUrls;
use crate::wood::Property;
use crate::BackendAppState;

use super::PlotImage;

/// Appends a version parameter so the image is fetched again even if the
/// server reuses the URL.
pub fn cache_busted(url: &str, stamp: u128) -> String {
    format!("{url}?v={stamp}")
}

pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

impl super::PlotPanel {
    /// Point every plot that has a URL in `urls` at that URL and reload it.
    /// Plots without URL keep what they show. Returns how many plots changed.
    pub fn apply_urls(
        &mut self,
        urls: &PlotUrls,
        stamp: u128,
        request_tx: &RequestSender<BackendAppState>,
    ) -> usize {
        let mut changed = 0;
        for property in Property::ALL {
            if let Some(url) = urls.get(property) {
                self.set_source(property, cache_busted(url, stamp), request_tx);
                changed += 1;
            }
        }
        changed
    }

    pub fn set_source(
        &mut self,
        property: Property,
        source: String,
        request_tx: &RequestSender<BackendAppState>,
    ) {
        let plot = &mut self.images[property.index()];
        log::debug!("loading {property} plot from {source}");
        plot.source = Some(source.clone());
        BackendLink::request_parameter_update(
            &mut plot.image,
            &format!("load {property} plot"),
            move |b: &BackendAppState| Some(b.load_plot(&source).map_err(|err| err.to_string())),
            request_tx,
        );
    }

    /// Returns true if any image finished loading.
    pub fn try_update(&mut self) -> bool {
        let mut updated = false;
        for plot in self.images.iter_mut() {
            if plot.image.try_update() {
                plot.texture = None;
                updated = true;
            }
        }
        updated
    }

    pub fn is_loading(&self) -> bool {
        self.images.iter().any(|plot| !plot.image.is_up_to_date())
    }

    pub fn sources(&self) -> [Option<String>; 3] {
        self.images.each_ref().map(|plot| plot.source.clone())
    }

    pub fn restore(
        &mut self,
        sources: [Option<String>; 3],
        request_tx: &RequestSender<BackendAppState>,
    ) {
        *self = Self::default();
        for (property, source) in Property::ALL.into_iter().zip(sources) {
            if let Some(source) = source {
                self.set_source(property, source, request_tx);
            }
        }
    }
}

impl PlotImage {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl super::PlotPanel {
    pub fn image(&self, property: Property) -> &PlotImage {
        &self.images[property.index()]
    }
}

#[cfg(test)]
impl PlotImage {
    pub fn is_loaded(&self) -> bool {
        matches!(self.image.value(), Some(Ok(_)))
    }
}
