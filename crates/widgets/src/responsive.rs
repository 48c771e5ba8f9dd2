//! Width-tracking chart variant.
//!
//! A [`Viewport`] stands in for the measured container: the host reports
//! width changes through [`Viewport::resize`] and any mounted
//! [`ResponsiveLineChart`] re-lays itself out on the next render. The chart
//! holds a [`ResizeSubscription`] that detaches its listener when the chart
//! is unmounted or dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::line_chart::{ChartLayout, ChartOptions, ChartViewport, LabelPrecision};
use crate::sample::Sample;

type Listener = Box<dyn Fn(f32) + Send + Sync>;

struct Inner {
    width: Mutex<f32>,
    listeners: Mutex<Vec<(u64, Arc<Listener>)>>,
    next_id: AtomicU64,
}

/// A measurable container that notifies subscribers when its width changes.
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<Inner>,
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self {
            inner: Arc::new(Inner {
                width: Mutex::new(width),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current container width.
    pub fn width(&self) -> f32 {
        self.inner.width.lock().map(|w| *w).unwrap_or(0.0)
    }

    /// Records a new width and notifies listeners if it changed.
    pub fn resize(&self, width: f32) {
        let changed = match self.inner.width.lock() {
            Ok(mut current) => {
                let changed = *current != width;
                *current = width;
                changed
            }
            Err(_) => false,
        };
        if !changed {
            return;
        }

        // Snapshot so listeners can subscribe or drop subscriptions re-entrantly.
        let listeners: Vec<Arc<Listener>> = match self.inner.listeners.lock() {
            Ok(guard) => guard.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(width);
        }
    }

    /// Registers `listener` for width changes until the returned handle drops.
    pub fn subscribe<F>(&self, listener: F) -> ResizeSubscription
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let listener: Listener = Box::new(listener);
        if let Ok(mut guard) = self.inner.listeners.lock() {
            guard.push((id, Arc::new(listener)));
        }
        ResizeSubscription {
            id,
            viewport: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().map(|g| g.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("width", &self.width())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Live registration on a [`Viewport`]; unsubscribes on drop.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    viewport: Weak<Inner>,
}

impl ResizeSubscription {
    /// Detaches the listener now.
    pub fn unsubscribe(self) {}
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        let Some(inner) = self.viewport.upgrade() else {
            return;
        };
        if let Ok(mut guard) = inner.listeners.lock() {
            guard.retain(|(id, _)| *id != self.id);
        }
    }
}

/// A line chart that fills the width of its container.
///
/// Uses 320px height, 60px padding, one-decimal gridline labels and a
/// minimum laid-out width of 200px.
#[derive(Debug)]
pub struct ResponsiveLineChart {
    width: Arc<Mutex<f32>>,
    options: ChartOptions,
    subscription: Option<ResizeSubscription>,
}

impl ResponsiveLineChart {
    /// Measures `viewport` and subscribes to its resizes.
    pub fn mount(viewport: &Viewport) -> Self {
        let width = Arc::new(Mutex::new(viewport.width()));
        let tracked = Arc::clone(&width);
        let subscription = viewport.subscribe(move |w| {
            if let Ok(mut guard) = tracked.lock() {
                *guard = w;
            }
        });
        Self {
            width,
            options: ChartOptions {
                precision: LabelPrecision::OneDecimal,
                ..ChartOptions::default()
            },
            subscription: Some(subscription),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.options.unit = unit.into();
        self
    }

    /// Sets the series color from a hex string; invalid input keeps the default.
    pub fn with_color(mut self, hex: &str) -> Self {
        if let Some(color) = crate::colors::Color::from_hex(hex) {
            self.options.color = color;
        }
        self
    }

    /// Last measured container width.
    pub fn width(&self) -> f32 {
        self.width.lock().map(|w| *w).unwrap_or(0.0)
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn viewport(&self) -> ChartViewport {
        ChartViewport::responsive(self.width())
    }

    pub fn layout(&self, samples: &[Sample]) -> ChartLayout {
        ChartLayout::compute(samples, self.viewport(), &self.options)
    }

    pub fn render_svg(&self, samples: &[Sample]) -> String {
        self.layout(samples).render_svg(&self.options)
    }

    /// Stops tracking the container. The last width is kept.
    pub fn unmount(&mut self) {
        self.subscription = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn resize_notifies_subscribers() {
        let viewport = Viewport::new(400.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _sub = viewport.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        viewport.resize(500.0);
        viewport.resize(500.0);
        viewport.resize(600.0);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(viewport.width(), 600.0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let viewport = Viewport::new(400.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = viewport.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(viewport.listener_count(), 1);

        drop(sub);
        assert_eq!(viewport.listener_count(), 0);

        viewport.resize(800.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_unsubscribe() {
        let viewport = Viewport::new(400.0);
        let a = viewport.subscribe(|_| {});
        let _b = viewport.subscribe(|_| {});
        a.unsubscribe();
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_viewport_is_harmless() {
        let viewport = Viewport::new(400.0);
        let sub = viewport.subscribe(|_| {});
        drop(viewport);
        drop(sub);
    }

    #[test]
    fn chart_tracks_container_width() {
        let viewport = Viewport::new(480.0);
        let chart = ResponsiveLineChart::mount(&viewport);
        assert_eq!(chart.width(), 480.0);

        let samples = vec![Sample::new("00:00", 1.0), Sample::new("01:00", 2.0)];
        let last_x = |layout: ChartLayout| match layout {
            ChartLayout::Plot(plot) => plot.points.last().map(|p| p.x),
            ChartLayout::Empty { .. } => None,
        };
        assert_eq!(last_x(chart.layout(&samples)), Some(420.0));

        viewport.resize(900.0);
        assert_eq!(chart.width(), 900.0);
        assert_eq!(chart.viewport().width, 900.0);
        assert_eq!(last_x(chart.layout(&samples)), Some(840.0));
    }

    #[test]
    fn chart_enforces_minimum_width() {
        let viewport = Viewport::new(120.0);
        let chart = ResponsiveLineChart::mount(&viewport);
        let vp = chart.viewport();
        assert_eq!(vp.width, 200.0);
        assert_eq!(vp.height, 320.0);
        assert_eq!(vp.padding, 60.0);
    }

    #[test]
    fn unmount_stops_tracking() {
        let viewport = Viewport::new(480.0);
        let mut chart = ResponsiveLineChart::mount(&viewport);
        assert!(chart.is_mounted());
        assert_eq!(viewport.listener_count(), 1);

        chart.unmount();
        assert!(!chart.is_mounted());
        assert_eq!(viewport.listener_count(), 0);

        viewport.resize(1000.0);
        assert_eq!(chart.width(), 480.0);
    }

    #[test]
    fn dropping_chart_releases_listener() {
        let viewport = Viewport::new(480.0);
        {
            let _chart = ResponsiveLineChart::mount(&viewport);
            assert_eq!(viewport.listener_count(), 1);
        }
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn chart_uses_one_decimal_labels() {
        let viewport = Viewport::new(600.0);
        let chart = ResponsiveLineChart::mount(&viewport).with_unit("ppm");
        let samples = vec![Sample::new("00:00", 1.0), Sample::new("01:00", 2.0)];
        let ChartLayout::Plot(plot) = chart.layout(&samples) else {
            panic!("expected plot");
        };
        assert_eq!(plot.grid[0].label, "0.9");
        assert_eq!(plot.grid[4].label, "2.1");
        assert_eq!(plot.markers[1].tooltip, "01:00: 2 ppm");
    }

    #[test]
    fn chart_renders_placeholder_when_empty() {
        let viewport = Viewport::new(600.0);
        let chart = ResponsiveLineChart::mount(&viewport);
        assert!(chart.render_svg(&[]).contains("Waiting for sensor data"));
    }
}
