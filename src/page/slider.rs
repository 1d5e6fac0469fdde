//! Hero slideshow.
//!
//! [`HeroSlider`] only decides *what* the slideshow shows. Whatever widget
//! displays it receives the configuration through [`SlideShowConfigurer`];
//! the terminal page uses [`SlideShow`].

use std::time::{Duration, Instant};

use super::{ElementId, FeatureStatus, Page};

/// One hero image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub src: &'static str,
    pub caption: &'static str,
}

/// The hero images, in rotation order.
pub const HERO_SLIDES: [Slide; 3] = [
    Slide {
        src: "images/slides/trabalhador-de-armazem-com-capacete-de-seguranca-conversando-ao-telefone-e-segurando-uma-lista-de-verificacao-na-instalacao-armazem-de-distribuicao.jpg",
        caption: "Warehouse worker with a safety helmet checking the distribution list",
    },
    Slide {
        src: "images/slides/dispositivo-de-sustentacao-de-homem-de-tiro-medio.jpg",
        caption: "Keep every device and product accounted for",
    },
    Slide {
        src: "images/slides/trabalhadora-negra-armazem-passando-pela-lista-de-remessas-enquanto-verifica-o-estoque-no-compartimento-de-armazenamento-industrial.jpg",
        caption: "Check shipments against the stock in the storage bay",
    },
];

/// Transition played when the slide changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Slow pan and zoom over the incoming image.
    KenBurns,
}

/// Declarative slideshow settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideShowConfig {
    pub slides: Vec<Slide>,
    /// Advance automatically every `delay`.
    pub timer: bool,
    pub delay: Duration,
    pub transition: Transition,
    pub transition_duration: Duration,
}

/// Anything able to display a configured slideshow.
pub trait SlideShowConfigurer {
    fn configure(&mut self, config: SlideShowConfig);
}

/// Sets up the hero slideshow when the page loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeroSlider;

impl HeroSlider {
    /// The fixed hero configuration: three slides, no timer, Ken Burns.
    pub fn config(transition_duration: Duration) -> SlideShowConfig {
        SlideShowConfig {
            slides: HERO_SLIDES.to_vec(),
            timer: false,
            delay: Duration::from_secs(5),
            transition: Transition::KenBurns,
            transition_duration,
        }
    }

    /// Hand the configuration to `configurer` if the hero element exists.
    pub fn attach<C: SlideShowConfigurer>(
        page: &Page,
        configurer: &mut C,
        transition_duration: Duration,
    ) -> FeatureStatus {
        let status = page.require(&[ElementId::HeroSlides]);
        if status.is_wired() {
            configurer.configure(Self::config(transition_duration));
        }
        status
    }
}

/// Pan/zoom state of a Ken Burns frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KenBurnsFrame {
    /// Rows/columns still cropped from each edge.
    pub inset: u16,
    /// Columns the image has drifted to the right.
    pub pan: u16,
}

const KEN_BURNS_MAX_INSET: u16 = 2;
const KEN_BURNS_MAX_PAN: u16 = 4;

/// Terminal slideshow widget state.
#[derive(Debug, Clone, Default)]
pub struct SlideShow {
    config: Option<SlideShowConfig>,
    current: usize,
    shown_at: Option<Instant>,
}

impl SlideShowConfigurer for SlideShow {
    fn configure(&mut self, config: SlideShowConfig) {
        self.config = Some(config);
        self.current = 0;
        self.shown_at = None;
    }
}

impl SlideShow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Option<&SlideShowConfig> {
        self.config.as_ref()
    }

    pub fn len(&self) -> usize {
        self.config.as_ref().map_or(0, |c| c.slides.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Slide> {
        self.config.as_ref()?.slides.get(self.current)
    }

    /// Show the next slide, wrapping around.
    pub fn next(&mut self, now: Instant) {
        let len = self.len();
        if len > 0 {
            self.current = (self.current + 1) % len;
            self.shown_at = Some(now);
        }
    }

    /// Show the previous slide, wrapping around.
    pub fn prev(&mut self, now: Instant) {
        let len = self.len();
        if len > 0 {
            self.current = (self.current + len - 1) % len;
            self.shown_at = Some(now);
        }
    }

    /// Advance on the timer, if it is enabled.
    pub fn tick(&mut self, now: Instant) {
        let Some(config) = &self.config else {
            return;
        };
        if !config.timer {
            return;
        }
        match self.shown_at {
            None => self.shown_at = Some(now),
            Some(shown) if now.saturating_duration_since(shown) >= config.delay => self.next(now),
            Some(_) => {}
        }
    }

    /// The transition frame at `now`, or `None` once the slide has settled.
    pub fn ken_burns(&self, now: Instant) -> Option<KenBurnsFrame> {
        let config = self.config.as_ref()?;
        let shown = self.shown_at?;
        let elapsed = now.saturating_duration_since(shown);
        if config.transition_duration.is_zero() || elapsed >= config.transition_duration {
            return None;
        }
        let progress = elapsed.as_secs_f64() / config.transition_duration.as_secs_f64();
        match config.transition {
            Transition::KenBurns => Some(KenBurnsFrame {
                inset: (f64::from(KEN_BURNS_MAX_INSET) * (1.0 - progress)).round() as u16,
                pan: (f64::from(KEN_BURNS_MAX_PAN) * progress).round() as u16,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SlideShowConfig>);

    impl SlideShowConfigurer for Recorder {
        fn configure(&mut self, config: SlideShowConfig) {
            self.0.push(config);
        }
    }

    #[test]
    fn test_attach_hands_over_fixed_config() {
        let mut recorder = Recorder::default();
        let status = HeroSlider::attach(&Page::full(), &mut recorder, Duration::from_secs(1));
        assert!(status.is_wired());
        assert_eq!(recorder.0.len(), 1);

        let config = &recorder.0[0];
        assert_eq!(config.slides, HERO_SLIDES.to_vec());
        assert!(!config.timer);
        assert_eq!(config.transition, Transition::KenBurns);
    }

    #[test]
    fn test_attach_without_hero_element() {
        let mut recorder = Recorder::default();
        let page = Page::without(&[ElementId::HeroSlides]);
        let status = HeroSlider::attach(&page, &mut recorder, Duration::from_secs(1));
        assert_eq!(status, FeatureStatus::Absent(vec![ElementId::HeroSlides]));
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_slides_wrap_both_ways() {
        let mut show = SlideShow::new();
        show.configure(HeroSlider::config(Duration::from_secs(1)));
        let now = Instant::now();

        show.prev(now);
        assert_eq!(show.index(), 2);
        show.next(now);
        show.next(now);
        assert_eq!(show.index(), 1);
        assert_eq!(show.current(), Some(&HERO_SLIDES[1]));
    }

    #[test]
    fn test_no_timer_means_no_auto_advance() {
        let mut show = SlideShow::new();
        show.configure(HeroSlider::config(Duration::from_secs(1)));
        let now = Instant::now();
        show.tick(now);
        show.tick(now + Duration::from_secs(60));
        assert_eq!(show.index(), 0);
    }

    #[test]
    fn test_timer_advances_after_delay() {
        let mut show = SlideShow::new();
        show.configure(SlideShowConfig {
            timer: true,
            ..HeroSlider::config(Duration::from_secs(1))
        });
        let now = Instant::now();
        show.tick(now);
        show.tick(now + Duration::from_secs(2));
        assert_eq!(show.index(), 0);
        show.tick(now + Duration::from_secs(5));
        assert_eq!(show.index(), 1);
    }

    #[test]
    fn test_ken_burns_frames() {
        let mut show = SlideShow::new();
        show.configure(HeroSlider::config(Duration::from_secs(1)));
        let now = Instant::now();
        // Nothing plays before the first change.
        assert!(show.ken_burns(now).is_none());

        show.next(now);
        assert_eq!(show.ken_burns(now), Some(KenBurnsFrame { inset: 2, pan: 0 }));
        assert_eq!(
            show.ken_burns(now + Duration::from_millis(500)),
            Some(KenBurnsFrame { inset: 1, pan: 2 })
        );
        assert!(show.ken_burns(now + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_unconfigured_show_ignores_input() {
        let mut show = SlideShow::new();
        show.next(Instant::now());
        assert!(show.current().is_none());
        assert!(show.is_empty());
    }
}
