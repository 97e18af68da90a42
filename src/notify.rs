/// Вид уведомления для пользователя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NotificationKind {
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "error")]
    Error,
}

/// Способ показать пользователю короткое уведомление.
pub trait Notifier {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Печатает уведомления в терминал.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => println!("✔ {}", message),
            NotificationKind::Error => eprintln!("✘ {}", message),
        }
    }
}
