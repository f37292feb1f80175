//! Toast notifications.
//!
//! Every row, bulk and auto-save action reports back through a toast with a
//! title and a description. Toasts stack in the bottom-right corner and
//! expire on their own.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message (blue).
    Info,
    /// Success message (green).
    Success,
    /// Warning message (yellow).
    Warning,
    /// Destructive action or error (red).
    Error,
}

impl NotificationType {
    /// Get the icon for this notification type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }

    /// Get the color for this notification type.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Success => Color::Green,
            NotificationType::Warning => Color::Yellow,
            NotificationType::Error => Color::Red,
        }
    }

    /// Default display time for this type.
    fn default_duration(&self) -> Duration {
        match self {
            NotificationType::Info | NotificationType::Success => Duration::from_secs(3),
            NotificationType::Warning | NotificationType::Error => Duration::from_secs(5),
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Short headline, e.g. "Row Added".
    pub title: String,
    /// Longer description.
    pub message: String,
    /// The type of notification.
    pub notification_type: NotificationType,
    /// When the notification was created.
    pub created_at: Instant,
    /// How long the notification should be displayed.
    pub duration: Duration,
}

impl Notification {
    /// Create a new notification with the type's default duration.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: notification_type.default_duration(),
        }
    }

    /// Create an info notification.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Info)
    }

    /// Create a success notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Success)
    }

    /// Create a warning notification.
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Warning)
    }

    /// Create an error (destructive) notification.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Error)
    }

    /// Set a custom duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Manages the visible toasts.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a new notification manager showing up to three toasts.
    pub fn new() -> Self {
        Self::with_max_visible(3)
    }

    /// Create a notification manager with a custom max visible count.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Add a notification, dropping the oldest past the limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Remove expired notifications. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Get the number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Get an iterator over the notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Get the most recent notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Render all notifications in the bottom-right corner of the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let notification_width = 50.min(area.width.saturating_sub(4));
        // Borders take one column on each side.
        let inner_width = notification_width.saturating_sub(2) as usize;

        let notification_heights: Vec<u16> = self
            .notifications
            .iter()
            .map(|n| {
                let title_lines = wrapped_lines(n.title.chars().count() + 2, inner_width);
                let message_lines = wrapped_lines(n.message.chars().count(), inner_width);
                title_lines + message_lines + 2
            })
            .collect();

        let total_height = notification_heights
            .iter()
            .sum::<u16>()
            .min(area.height.saturating_sub(2));

        let x = area.x + area.width.saturating_sub(notification_width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);
        let notifications_area = Rect::new(x, y, notification_width, total_height);

        let constraints: Vec<Constraint> = notification_heights
            .iter()
            .map(|&h| Constraint::Length(h))
            .collect();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(notifications_area);

        for (notification, chunk) in self.notifications.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

/// Number of lines `len` characters need at `width`, at least one.
fn wrapped_lines(len: usize, width: usize) -> u16 {
    if width == 0 || len == 0 {
        return 1;
    }
    len.div_ceil(width) as u16
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.notification_type.color());
    let icon = notification.notification_type.icon();

    let text = vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon), style.add_modifier(Modifier::BOLD)),
            Span::styled(
                notification.title.as_str(),
                style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::raw(notification.message.as_str())),
    ];

    let block = Block::default().borders(Borders::ALL).border_style(style);

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
