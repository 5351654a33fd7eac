//! Error toasts
//!
//! `ToastContext` is the page's notifier: feed failures call
//! `BaseNotifier::error` and a toast appears in the corner.

use dioxus::prelude::*;
use listings_core::BaseNotifier;

/// How long a toast stays up before dismissing itself (browser only).
#[cfg(feature = "web")]
const TOAST_TTL_MS: u32 = 5_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl ToastContext {
    pub fn push(&self, message: &str) -> u64 {
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let mut toasts = self.toasts;
        toasts.write().push(Toast {
            id,
            message: message.to_string(),
        });
        id
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().retain(|toast| toast.id != id);
    }
}

impl BaseNotifier for ToastContext {
    fn error(&self, message: &str) {
        let id = self.push(message);

        #[cfg(feature = "web")]
        {
            let toasts = *self;
            spawn(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
                toasts.dismiss(id);
            });
        }
        #[cfg(not(feature = "web"))]
        let _ = id;
    }
}

/// Provides `ToastContext` to children and renders the toast stack
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Vec::<Toast>::new);
    let next_id = use_signal(|| 0u64);

    let context = use_context_provider(|| ToastContext { toasts, next_id });

    rsx! {
        {children}

        div {
            class: "fixed top-4 right-4 z-50 flex flex-col gap-2",
            for toast in toasts() {
                div {
                    key: "{toast.id}",
                    class: "flex items-center gap-3 bg-red-600 text-white text-sm px-4 py-3 rounded-lg shadow-lg",
                    role: "alert",
                    span { "{toast.message}" }
                    button {
                        class: "text-white/80 hover:text-white",
                        onclick: move |_| context.dismiss(toast.id),
                        "\u{2715}"
                    }
                }
            }
        }
    }
}

/// Hook to access the toast context
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>()
}
