#![forbid(unsafe_code)]

//! The overlay presentation controller.
//!
//! [`OverlayController`] is a headless state machine. The host forwards
//! elapsed time ([`tick`](OverlayController::tick)), geometry, keyboard
//! height and pan events, and renders whatever
//! [`placement`](OverlayController::placement) reports. Everything the host
//! must do besides drawing (attach, detach, resign the keyboard, react to a
//! button) comes out as [`OverlayEvent`]s.
//!
//! # Invariants
//!
//! - Exactly one [`LifecycleState`] is active.
//! - The style cannot change unless the overlay is Hidden.
//! - A present completion runs at most once, only when the entrance
//!   finishes. A dismiss completion runs at most once, after Hidden.
//! - A drag session exists only while Dragging.
//! - Dropping the controller drops every pending task and completion.
//!
//! # Failure Modes
//!
//! - `present` while not Hidden and `dismiss` while Hidden or Dismissing are
//!   ignored; the completion passed in is dropped without running.
//! - `dismiss` during Presenting cancels the entrance; the present completion
//!   is dropped and the exit starts from wherever the entrance had reached.
//! - A timer expiring while Hidden or Dismissing does nothing.

use std::fmt;
use std::time::Duration;

use popkit_core::color::Rgba;
use popkit_core::easing::Easing;
use popkit_core::geometry::{Size, Viewport};
use popkit_core::gesture::{PanEvent, PanPhase};
use popkit_core::schedule::Scheduler;

use crate::config::OverlayConfig;
use crate::content::{ButtonId, ButtonRole, ContentBlock, MeasuredContent, OverlayContent, Section};
use crate::drag::{DragDecision, DragSession};
use crate::error::ConfigError;
use crate::event::{Completion, Handler, OverlayEvent};
use crate::intent::{LayoutIntent, Placement, ResolveContext, StyleProfile};
use crate::lifecycle::{LifecycleState, Transition};
use crate::style::{AlertAnimations, EntryDirection, OverlayStyle};
use crate::timer::AutoDismissTimer;

/// Title icon used by [`OverlayController::present_error`].
pub const ERROR_ICON: &str = "exclamationmark.circle.fill";
/// Image used by [`OverlayController::present_error`].
pub const ERROR_IMAGE: &str = "error_placeholder";

// ============================================================================
// Internal bookkeeping
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Settle delay elapsed: start animating on screen.
    BeginEntrance,
    FinishEntrance,
    FinishExit,
    /// A snap-back or keyboard relayout finished.
    FinishSettle,
    StartTimer,
    ExpireTimer,
}

impl Task {
    fn is_entrance(self) -> bool {
        matches!(self, Self::BeginEntrance | Self::FinishEntrance)
    }

    fn is_timer(self) -> bool {
        matches!(self, Self::StartTimer | Self::ExpireTimer)
    }
}

/// In-flight interpolation towards a live-resolved intent.
#[derive(Debug, Clone, Copy)]
struct Animation {
    from: Placement,
    to: LayoutIntent,
    started_at: Duration,
    duration: Duration,
    easing: Easing,
}

impl Animation {
    fn sample(&self, now: Duration, ctx: &ResolveContext<'_>) -> Placement {
        let target = self.to.resolve(ctx);
        if self.duration.is_zero() {
            return target;
        }
        let elapsed = now.saturating_sub(self.started_at).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.from.lerp(&target, self.easing.apply(t))
    }
}

/// Why the overlay is leaving; decides what runs once it is Hidden.
enum DismissCause {
    Call(Option<Completion>),
    Timer,
    Drag,
    Backdrop,
    CloseButton,
    Button(ButtonId),
}

impl DismissCause {
    #[cfg(feature = "tracing")]
    fn as_str(&self) -> &'static str {
        match self {
            Self::Call(_) => "call",
            Self::Timer => "timer",
            Self::Drag => "drag",
            Self::Backdrop => "backdrop",
            Self::CloseButton => "close_button",
            Self::Button(_) => "button",
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Headless controller for one overlay.
pub struct OverlayController {
    config: OverlayConfig,
    state: LifecycleState,
    scheduler: Scheduler<Task>,
    viewport: Viewport,
    keyboard_height: f64,
    content: OverlayContent,
    next_button_id: u32,
    /// Intent the overlay rests at (or is animating towards).
    resting: LayoutIntent,
    animation: Option<Animation>,
    drag: Option<DragSession>,
    timer: Option<AutoDismissTimer>,
    pending_present: Option<Completion>,
    pending_dismiss: Option<DismissCause>,
    on_backdrop_tap: Option<Handler>,
    on_close_button: Option<Handler>,
    on_drag_dismiss: Option<Handler>,
    events: Vec<OverlayEvent>,
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("state", &self.state)
            .field("style", &self.config.style)
            .field("now", &self.scheduler.now())
            .field("pending_tasks", &self.scheduler.len())
            .field("viewport", &self.viewport)
            .field("keyboard_height", &self.keyboard_height)
            .field("drag", &self.drag)
            .field("timer", &self.timer)
            .field("queued_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::build(OverlayConfig::default())
    }
}

impl OverlayController {
    /// Controller with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with a validated configuration.
    pub fn with_config(config: OverlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: OverlayConfig) -> Self {
        let content = OverlayContent {
            show_close_button: config.show_close_button,
            ..OverlayContent::default()
        };
        let resting = StyleProfile::for_style(config.style).offscreen_intent(
            config.entry_direction,
            config.entry_animations,
            config.zoom_scale,
        );
        Self {
            config,
            state: LifecycleState::Hidden,
            scheduler: Scheduler::new(),
            viewport: Viewport::default(),
            keyboard_height: 0.0,
            content,
            next_button_id: 0,
            resting,
            animation: None,
            drag: None,
            timer: None,
            pending_present: None,
            pending_dismiss: None,
            on_backdrop_tap: None,
            on_close_button: None,
            on_drag_dismiss: None,
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn style(&self) -> OverlayStyle {
        self.config.style
    }

    #[inline]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Virtual time accumulated through [`tick`](Self::tick).
    #[inline]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn keyboard_height(&self) -> f64 {
        self.keyboard_height
    }

    /// Backdrop color to draw now: the configured color faded by the current
    /// placement's backdrop alpha.
    pub fn backdrop_color(&self) -> Rgba {
        self.config
            .backdrop_color
            .with_alpha(self.placement().backdrop_alpha)
    }

    /// Tint of buttons, title icon and timer bar.
    #[inline]
    pub fn tint(&self) -> Rgba {
        self.config.tint
    }

    #[inline]
    pub fn content(&self) -> &OverlayContent {
        &self.content
    }

    /// Active drag, only while Dragging.
    #[inline]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn timer(&self) -> Option<&AutoDismissTimer> {
        self.timer.as_ref()
    }

    /// Auto-dismiss progress in [0.0, 1.0]; 0.0 when no countdown runs.
    pub fn timer_progress(&self) -> f64 {
        self.timer
            .as_ref()
            .map_or(0.0, |t| t.progress(self.scheduler.now()))
    }

    /// Whether the host should draw the timer bar.
    pub fn timer_indicator_visible(&self) -> bool {
        self.timer.is_some() && self.config.show_timer_indicator != Some(false)
    }

    /// Popover size: viewport width by intrinsic content height.
    pub fn preferred_content_size(&self) -> Size {
        let width = self.viewport.size.width;
        Size::new(
            width,
            self.content
                .intrinsic_height(width, &self.config.metrics, self.config.margin),
        )
    }

    /// Where and how the host should draw the overlay right now.
    pub fn placement(&self) -> Placement {
        let now = self.scheduler.now();
        self.with_context(|ctx| {
            if let (LifecycleState::Dragging, Some(drag), Some(rule)) =
                (self.state, self.drag.as_ref(), self.config.style.drag_rule())
            {
                return self.resting.resolve(ctx).offset_y(drag.offset(rule));
            }
            match &self.animation {
                Some(anim) => anim.sample(now, ctx),
                None => self.resting.resolve(ctx),
            }
        })
    }

    fn with_context<R>(&self, f: impl FnOnce(&ResolveContext<'_>) -> R) -> R {
        let measured = MeasuredContent {
            content: &self.content,
            metrics: &self.config.metrics,
            margin: self.config.margin,
        };
        let ctx = ResolveContext {
            viewport: self.viewport,
            keyboard_height: self.keyboard_height,
            margin: self.config.margin,
            notification_fraction: self.config.notification_height_fraction,
            preferred_size: self.preferred_content_size(),
            content: &measured,
        };
        f(&ctx)
    }

    fn profile(&self) -> &'static StyleProfile {
        StyleProfile::for_style(self.config.style)
    }

    fn entry_intent(&self) -> LayoutIntent {
        self.profile().offscreen_intent(
            self.config.entry_direction,
            self.config.entry_animations,
            self.config.zoom_scale,
        )
    }

    fn exit_intent(&self) -> LayoutIntent {
        self.profile().offscreen_intent(
            self.config.exit_direction,
            self.config.exit_animations,
            self.config.zoom_scale,
        )
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Change the style. Ignored unless Hidden.
    pub fn set_style(&mut self, style: OverlayStyle) -> Transition {
        if self.state != LifecycleState::Hidden {
            self.log_ignored("set_style");
            return Transition::Ignored;
        }
        self.config.style = style;
        self.refresh_hidden();
        Transition::Started
    }

    pub fn set_entry_direction(&mut self, direction: EntryDirection) {
        self.config.entry_direction = direction;
        self.refresh_hidden();
    }

    pub fn set_exit_direction(&mut self, direction: EntryDirection) {
        self.config.exit_direction = direction;
    }

    pub fn set_entry_animations(&mut self, animations: AlertAnimations) {
        self.config.entry_animations = animations;
        self.refresh_hidden();
    }

    pub fn set_exit_animations(&mut self, animations: AlertAnimations) {
        self.config.exit_animations = animations;
    }

    /// Duration of later entrances, exits and snap-backs.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.config.animation_duration = duration;
    }

    pub fn set_pan_gesture_enabled(&mut self, enabled: bool) {
        self.config.pan_gesture_enabled = enabled;
        if !enabled && self.state == LifecycleState::Dragging {
            self.snap_back();
        }
    }

    pub fn set_dismiss_on_backdrop_tap(&mut self, enabled: bool) {
        self.config.dismiss_on_backdrop_tap = enabled;
    }

    pub fn set_show_timer_indicator(&mut self, show: Option<bool>) {
        self.config.show_timer_indicator = show;
    }

    /// Set the tint; tinted images follow it.
    pub fn set_tint(&mut self, tint: Rgba) {
        self.config.tint = tint;
        self.content.retint(tint);
    }

    /// Host geometry changed. Takes effect immediately.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.content_changed();
    }

    /// Keyboard height changed.
    ///
    /// While resting on screen the overlay animates to its new layout over
    /// the keyboard animation duration; in-flight animations retarget.
    pub fn set_keyboard_height(&mut self, height: f64) {
        let height = height.max(0.0);
        if height == self.keyboard_height {
            return;
        }
        let before = self.placement();
        self.keyboard_height = height;
        if self.state == LifecycleState::Presented && !self.config.style.is_host_animated() {
            self.scheduler.cancel_where(|t| *t == Task::FinishSettle);
            self.start_animation(
                before,
                self.resting,
                self.config.keyboard_animation_duration,
            );
            self.scheduler
                .schedule(self.config.keyboard_animation_duration, Task::FinishSettle);
        }
    }

    /// Configure the auto-dismiss timer, replacing any previous one.
    ///
    /// `None` or zero removes the timer. A timer set while on screen starts
    /// counting after the settle delay; one set while Hidden is armed by the
    /// next `present`. `completion` runs after every timer-driven dismissal.
    pub fn set_timer(&mut self, duration: Option<Duration>, completion: Option<Handler>) {
        self.scheduler.cancel_where(|t| t.is_timer());
        self.timer = duration.and_then(|d| AutoDismissTimer::new(d, completion));
        if self.timer.is_some()
            && matches!(
                self.state,
                LifecycleState::Presenting | LifecycleState::Presented | LifecycleState::Dragging
            )
        {
            self.scheduler
                .schedule(self.config.settle_delay, Task::StartTimer);
        }
    }

    /// Run after a backdrop tap has dismissed the overlay.
    pub fn on_backdrop_tap(&mut self, handler: impl FnMut() + 'static) {
        self.on_backdrop_tap = Some(Box::new(handler));
    }

    /// Run after the close button has dismissed the overlay.
    pub fn on_close_button(&mut self, handler: impl FnMut() + 'static) {
        self.on_close_button = Some(Box::new(handler));
    }

    /// Run after a drag has dismissed the overlay.
    pub fn on_drag_dismiss(&mut self, handler: impl FnMut() + 'static) {
        self.on_drag_dismiss = Some(Box::new(handler));
    }

    fn refresh_hidden(&mut self) {
        if self.state == LifecycleState::Hidden {
            self.resting = self.entry_intent();
        }
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Append a block to the body.
    pub fn add_content(&mut self, block: ContentBlock) {
        self.push_block(Section::Body, block);
    }

    /// Append a block to the sticky header.
    pub fn add_header_content(&mut self, block: ContentBlock) {
        self.push_block(Section::Header, block);
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_content(ContentBlock::Text(text.into()));
    }

    /// Append an image; a tinted image follows [`set_tint`](Self::set_tint).
    pub fn add_image(&mut self, name: impl Into<String>, tinted: bool) {
        self.add_content(ContentBlock::Image {
            name: name.into(),
            tint: tinted.then_some(self.config.tint),
            height_ratio: ContentBlock::IMAGE_HEIGHT_RATIO,
        });
    }

    pub fn add_text_field(&mut self, placeholder: impl Into<String>, mandatory: bool) {
        self.add_content(ContentBlock::TextField {
            placeholder: placeholder.into(),
            mandatory,
        });
    }

    /// Body button that only reports presses.
    pub fn add_button(&mut self, title: impl Into<String>) -> ButtonId {
        self.push_button(Section::Body, title.into(), ButtonRole::Default)
    }

    /// Body button that dismisses, labelled with the dismiss label.
    pub fn add_dismiss_button(&mut self) -> ButtonId {
        let title = self.config.dismiss_label.clone();
        self.push_button(Section::Body, title, ButtonRole::Dismiss)
    }

    /// Body button that dismisses, labelled with the cancel label.
    pub fn add_cancel_button(&mut self) -> ButtonId {
        let title = self.config.cancel_label.clone();
        self.push_button(Section::Body, title, ButtonRole::Cancel)
    }

    /// Footer button that only reports presses.
    pub fn add_sticky_button(&mut self, title: impl Into<String>) -> ButtonId {
        self.push_button(Section::Footer, title.into(), ButtonRole::Default)
    }

    pub fn add_sticky_dismiss_button(&mut self) -> ButtonId {
        let title = self.config.dismiss_label.clone();
        self.push_button(Section::Footer, title, ButtonRole::Dismiss)
    }

    pub fn add_sticky_cancel_button(&mut self) -> ButtonId {
        let title = self.config.cancel_label.clone();
        self.push_button(Section::Footer, title, ButtonRole::Cancel)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.content.title = title.into();
        self.content_changed();
    }

    pub fn set_title_icon(&mut self, icon: Option<String>) {
        self.content.title_icon = icon;
        self.content_changed();
    }

    pub fn set_show_close_button(&mut self, show: bool) {
        self.content.show_close_button = show;
        self.content_changed();
    }

    /// Remove every block, the title and the icon.
    pub fn clear_content(&mut self) {
        self.content = OverlayContent {
            show_close_button: self.content.show_close_button,
            ..OverlayContent::default()
        };
        self.content_changed();
    }

    fn push_button(&mut self, section: Section, title: String, role: ButtonRole) -> ButtonId {
        self.next_button_id += 1;
        let id = ButtonId(self.next_button_id);
        self.push_block(section, ContentBlock::Button { id, title, role });
        id
    }

    fn push_block(&mut self, section: Section, block: ContentBlock) {
        self.content.push(section, block);
        self.content_changed();
    }

    fn content_changed(&mut self) {
        if self.config.style == OverlayStyle::Popover && self.state.is_visible() {
            let size = self.preferred_content_size();
            self.events.push(OverlayEvent::PreferredContentSize(size));
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Attach and animate on screen. Ignored unless Hidden.
    ///
    /// `completion` runs once the entrance finishes.
    pub fn present(&mut self, completion: Option<Completion>) -> Transition {
        if !self.state.accepts_present() {
            self.log_ignored("present");
            return Transition::Ignored;
        }
        self.scheduler.clear();
        self.drag = None;
        self.animation = None;
        self.pending_dismiss = None;
        self.pending_present = completion;
        self.events.push(OverlayEvent::HideKeyboard);

        if self.config.style.is_host_animated() {
            self.resting = self.profile().onscreen;
            self.events.push(OverlayEvent::PreferredContentSize(
                self.preferred_content_size(),
            ));
            self.events.push(OverlayEvent::Attach { animated: true });
            self.set_state(LifecycleState::Presenting);
            self.scheduler
                .schedule(self.config.animation_duration, Task::FinishEntrance);
        } else {
            self.resting = self.entry_intent();
            self.events.push(OverlayEvent::Attach { animated: false });
            self.set_state(LifecycleState::Presenting);
            self.scheduler
                .schedule(self.config.settle_delay, Task::BeginEntrance);
        }

        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
            self.scheduler
                .schedule(self.config.settle_delay, Task::StartTimer);
        }
        Transition::Started
    }

    /// Animate off screen and detach. Ignored when Hidden or Dismissing.
    ///
    /// `completion` runs once the overlay is Hidden.
    pub fn dismiss(&mut self, completion: Option<Completion>) -> Transition {
        self.begin_dismiss(DismissCause::Call(completion))
    }

    /// Present `error` as an alert: red tint, warning title and icon, the
    /// error text with its source as the failure reason, and one dismiss
    /// button. Ignored unless Hidden; content is left untouched then.
    pub fn present_error(&mut self, error: &dyn std::error::Error) -> Transition {
        if !self.state.accepts_present() {
            self.log_ignored("present_error");
            return Transition::Ignored;
        }
        self.set_tint(Rgba::RED);
        self.clear_content();
        self.content.title = self.config.error_title.clone();
        self.content.title_icon = Some(ERROR_ICON.to_owned());
        self.add_image(ERROR_IMAGE, false);
        let mut text = error.to_string();
        if let Some(reason) = error.source() {
            text.push('\n');
            text.push_str(&reason.to_string());
        }
        self.add_text(text);
        self.add_dismiss_button();
        self.present(None)
    }

    fn begin_dismiss(&mut self, cause: DismissCause) -> Transition {
        if !self.state.accepts_dismiss() {
            self.log_ignored("dismiss");
            return Transition::Ignored;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "popkit.overlay",
            cause = cause.as_str(),
            state = self.state.as_str(),
            "overlay.dismiss"
        );

        let from = self.placement();
        if self.state == LifecycleState::Presenting {
            self.scheduler.cancel_where(|t| t.is_entrance());
            self.pending_present = None;
        }
        self.scheduler
            .cancel_where(|t| t.is_timer() || *t == Task::FinishSettle);
        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
        }
        self.drag = None;
        self.pending_dismiss = Some(cause);
        self.events.push(OverlayEvent::HideKeyboard);

        let style = self.config.style;
        if style.is_host_animated() {
            self.set_state(LifecycleState::Dismissing);
            self.finish_exit(true);
            return Transition::Started;
        }
        if style == OverlayStyle::Alert
            && self.config.exit_direction == EntryDirection::None
            && self.config.exit_animations.is_empty()
        {
            self.set_state(LifecycleState::Dismissing);
            self.finish_exit(false);
            return Transition::Started;
        }

        let to = self.exit_intent();
        self.resting = to;
        self.start_animation(from, to, self.config.animation_duration);
        self.set_state(LifecycleState::Dismissing);
        self.scheduler
            .schedule(self.config.animation_duration, Task::FinishExit);
        Transition::Started
    }

    fn finish_exit(&mut self, animated: bool) {
        self.scheduler.clear();
        self.animation = None;
        self.drag = None;
        self.resting = self.exit_intent();
        self.set_state(LifecycleState::Hidden);
        self.events.push(OverlayEvent::Detach { animated });
        match self.pending_dismiss.take() {
            Some(DismissCause::Call(Some(done))) => done(),
            Some(DismissCause::Timer) => {
                if let Some(timer) = self.timer.as_mut() {
                    timer.run_completion();
                }
            }
            Some(DismissCause::Drag) => run_handler(&mut self.on_drag_dismiss),
            Some(DismissCause::Backdrop) => run_handler(&mut self.on_backdrop_tap),
            Some(DismissCause::CloseButton) => run_handler(&mut self.on_close_button),
            Some(DismissCause::Button(id)) => self.events.push(OverlayEvent::ButtonPressed(id)),
            Some(DismissCause::Call(None)) | None => {}
        }
    }

    fn start_animation(&mut self, from: Placement, to: LayoutIntent, duration: Duration) {
        self.animation = Some(Animation {
            from,
            to,
            started_at: self.scheduler.now(),
            duration,
            easing: self.config.easing,
        });
    }

    fn snap_back(&mut self) {
        let from = self.placement();
        self.drag = None;
        self.set_state(LifecycleState::Presented);
        self.scheduler.cancel_where(|t| *t == Task::FinishSettle);
        self.start_animation(from, self.resting, self.config.animation_duration);
        self.scheduler
            .schedule(self.config.animation_duration, Task::FinishSettle);
    }

    fn set_state(&mut self, to: LifecycleState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.events.push(OverlayEvent::StateChanged { from, to });
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "popkit.overlay",
            from = from.as_str(),
            to = to.as_str(),
            style = ?self.config.style,
            "overlay.transition"
        );
    }

    fn log_ignored(&self, operation: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "popkit.overlay",
            operation,
            state = self.state.as_str(),
            "overlay.ignored"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = operation;
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Feed a pan event from the host's gesture recognizer.
    ///
    /// Only draggable styles with the pan gesture enabled react.
    pub fn pan(&mut self, event: PanEvent) {
        let Some(rule) = self.config.style.drag_rule() else {
            return;
        };
        if !self.config.pan_gesture_enabled {
            return;
        }
        match event.phase {
            PanPhase::Began => {
                if self.state != LifecycleState::Presented {
                    return;
                }
                self.scheduler.cancel_where(|t| *t == Task::FinishSettle);
                self.animation = None;
                self.drag = Some(DragSession {
                    start_translation: event.translation,
                    current_translation: event.translation,
                    velocity: event.velocity,
                });
                self.set_state(LifecycleState::Dragging);
            }
            PanPhase::Changed => {
                if !event.velocity.is_vertical_dominant() {
                    return;
                }
                if let Some(drag) = self.drag.as_mut() {
                    drag.current_translation = event.translation;
                    drag.velocity = event.velocity;
                }
            }
            PanPhase::Ended => {
                let Some(drag) = self.drag.as_mut() else {
                    return;
                };
                drag.current_translation = event.translation;
                drag.velocity = event.velocity;
                let height = self.with_context(|ctx| self.resting.resolve(ctx).frame.height);
                let decision = rule.decide(
                    height,
                    event.translation.y,
                    event.velocity.y,
                    self.config.dismiss_velocity,
                );
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "popkit.overlay",
                    decision = ?decision,
                    velocity_y = event.velocity.y,
                    translation_y = event.translation.y,
                    height,
                    "overlay.drag_end"
                );
                match decision {
                    DragDecision::Dismiss => {
                        self.begin_dismiss(DismissCause::Drag);
                    }
                    DragDecision::SnapBack => self.snap_back(),
                }
            }
            PanPhase::Cancelled => {
                if self.state == LifecycleState::Dragging {
                    self.snap_back();
                }
            }
        }
    }

    /// The host saw a tap on the backdrop.
    pub fn tap_backdrop(&mut self) -> Transition {
        if !self.config.dismiss_on_backdrop_tap {
            return Transition::Ignored;
        }
        self.begin_dismiss(DismissCause::Backdrop)
    }

    /// The host saw a tap on the title bar close button.
    pub fn tap_close_button(&mut self) -> Transition {
        if !self.content.show_close_button {
            return Transition::Ignored;
        }
        self.begin_dismiss(DismissCause::CloseButton)
    }

    /// The host saw a tap on a content button.
    ///
    /// Plain buttons report [`OverlayEvent::ButtonPressed`] at once; dismiss
    /// and cancel buttons report it after the overlay is Hidden. Returns
    /// `false` for unknown ids and when nothing is on screen.
    pub fn press_button(&mut self, id: ButtonId) -> bool {
        let Some((_, role)) = self.content.button(id) else {
            return false;
        };
        if !self.state.is_visible() || self.state == LifecycleState::Dismissing {
            return false;
        }
        if role.dismisses() {
            self.begin_dismiss(DismissCause::Button(id)).is_started()
        } else {
            self.events.push(OverlayEvent::ButtonPressed(id));
            true
        }
    }

    /// Advance time by `delta`, running due tasks in deadline order, and
    /// return the events produced since the last drain.
    pub fn tick(&mut self, delta: Duration) -> Vec<OverlayEvent> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "overlay.tick",
            delta_us = delta.as_micros() as u64,
            state = self.state.as_str()
        )
        .entered();

        let target = self.scheduler.now().saturating_add(delta);
        while let Some(deadline) = self.scheduler.next_deadline() {
            if deadline > target {
                break;
            }
            self.scheduler.advance_clock_to(deadline);
            while let Some(fired) = self.scheduler.pop_due() {
                self.run_task(fired.payload);
            }
        }
        self.scheduler.advance_clock_to(target);
        self.drain_events()
    }

    /// Take queued events without advancing time.
    pub fn drain_events(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.events)
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::BeginEntrance => {
                let from = self.placement();
                let to = self.profile().onscreen;
                self.resting = to;
                self.start_animation(from, to, self.config.animation_duration);
                self.scheduler
                    .schedule(self.config.animation_duration, Task::FinishEntrance);
            }
            Task::FinishEntrance => {
                self.animation = None;
                self.set_state(LifecycleState::Presented);
                if let Some(done) = self.pending_present.take() {
                    done();
                }
            }
            Task::FinishExit => self.finish_exit(false),
            Task::FinishSettle => self.animation = None,
            Task::StartTimer => {
                let now = self.scheduler.now();
                if let Some(timer) = self.timer.as_mut() {
                    timer.start(now);
                    let duration = timer.duration();
                    self.events.push(OverlayEvent::TimerStarted { duration });
                    self.scheduler.schedule(duration, Task::ExpireTimer);
                    self.log_timer("started");
                }
            }
            Task::ExpireTimer => {
                if matches!(
                    self.state,
                    LifecycleState::Hidden | LifecycleState::Dismissing
                ) {
                    return;
                }
                self.log_timer("expired");
                self.events.push(OverlayEvent::TimerExpired);
                self.begin_dismiss(DismissCause::Timer);
            }
        }
    }

    fn log_timer(&self, phase: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "popkit.overlay",
            phase,
            progress = self.timer_progress(),
            "overlay.timer"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = phase;
    }
}

fn run_handler(handler: &mut Option<Handler>) {
    if let Some(f) = handler.as_mut() {
        f();
    }
}
