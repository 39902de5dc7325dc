use std::cell::{Ref, RefCell, RefMut};
use std::future::Future;
use std::rc::Rc;

use cloudwidget_core::{CompletionEvent, EventChannel, Subscription, UploadOptions, WidgetError};
use futures::channel::oneshot;
use serde_json::Value;

use crate::host::{CompletionCallback, UploadHost};
use crate::trigger::TriggerButton;

type SharedChannel = Rc<RefCell<EventChannel<CompletionEvent>>>;
type TriggerObserver = Box<dyn Fn(&TriggerButton)>;

/// Upload button bound to a hosted widget.
///
/// Every open reads a snapshot of the current options; the callback of that
/// open publishes one [`CompletionEvent`] to the listeners registered at the
/// time it fires.
///
/// Options and trigger stay mutable through `&self`, so a widget shared with a
/// button's click handler can still be reconfigured or disabled.
pub struct UploadWidget<H: UploadHost> {
    host: H,
    options: RefCell<UploadOptions>,
    trigger: RefCell<TriggerButton>,
    trigger_observer: RefCell<Option<TriggerObserver>>,
    channel: SharedChannel,
}

impl<H: UploadHost> UploadWidget<H> {
    pub fn new(host: H) -> Self {
        Self::with_trigger(host, TriggerButton::default())
    }

    pub fn with_trigger(host: H, trigger: TriggerButton) -> Self {
        Self {
            host,
            options: RefCell::new(UploadOptions::new()),
            trigger: RefCell::new(trigger),
            trigger_observer: RefCell::new(None),
            channel: Rc::new(RefCell::new(EventChannel::new())),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Current options.
    ///
    /// Panics if called from inside an `options_mut` borrow.
    pub fn options(&self) -> Ref<'_, UploadOptions> {
        self.options.borrow()
    }

    pub fn options_mut(&self) -> Result<RefMut<'_, UploadOptions>, WidgetError> {
        self.options.try_borrow_mut().map_err(|_| {
            WidgetError::InvalidOptions("upload options are already borrowed".to_string())
        })
    }

    pub fn set_options(&self, options: UploadOptions) -> Result<(), WidgetError> {
        *self.options_mut()? = options;
        Ok(())
    }

    pub fn trigger(&self) -> Ref<'_, TriggerButton> {
        self.trigger.borrow()
    }

    /// Changes the trigger and reports the new state to the observer, if any.
    pub fn update_trigger<F>(&self, update: F) -> Result<(), WidgetError>
    where
        F: FnOnce(&mut TriggerButton),
    {
        {
            let mut trigger = self.trigger.try_borrow_mut().map_err(|_| {
                WidgetError::InvalidOptions("upload trigger is already borrowed".to_string())
            })?;
            update(&mut trigger);
        }
        if let Some(observer) = self.trigger_observer.borrow().as_ref() {
            observer(&self.trigger.borrow());
        }
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<(), WidgetError> {
        self.update_trigger(|trigger| trigger.set_enabled(enabled))
    }

    pub fn set_text(&self, text: impl Into<String>) -> Result<(), WidgetError> {
        let text = text.into();
        self.update_trigger(|trigger| trigger.set_text(text))
    }

    pub fn set_html(&self, html: impl Into<String>) -> Result<(), WidgetError> {
        let html = html.into();
        self.update_trigger(|trigger| trigger.set_html(html))
    }

    /// Registers the single observer of trigger changes, replacing any previous one.
    /// It is called once immediately with the current state.
    pub fn observe_trigger<F>(&self, observer: F) -> Result<(), WidgetError>
    where
        F: Fn(&TriggerButton) + 'static,
    {
        observer(&self.trigger.borrow());
        let mut slot = self.trigger_observer.try_borrow_mut().map_err(|_| {
            WidgetError::InvalidOptions("trigger observer cannot be replaced while it runs".to_string())
        })?;
        *slot = Some(Box::new(observer));
        Ok(())
    }

    pub fn subscribe<F>(&self, listener: F) -> Result<Subscription, WidgetError>
    where
        F: FnMut(&CompletionEvent) -> anyhow::Result<()> + 'static,
    {
        Ok(borrow_channel(&self.channel)?.subscribe(listener))
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> Result<bool, WidgetError> {
        Ok(borrow_channel(&self.channel)?.unsubscribe(subscription))
    }

    /// Trigger activation. Returns `false` without opening when the trigger is disabled.
    pub fn click(&self) -> Result<bool, WidgetError> {
        if !self.trigger.borrow().is_enabled() {
            tracing::debug!("Upload trigger disabled, ignoring activation");
            return Ok(false);
        }
        self.open()?;
        Ok(true)
    }

    /// Opens the hosted widget regardless of the trigger state.
    pub fn open(&self) -> Result<(), WidgetError> {
        let channel = Rc::clone(&self.channel);
        let on_close: CompletionCallback = Box::new(move |error, result| {
            dispatch(&channel, CompletionEvent::from_callback(error, result))?;
            Ok(())
        });
        self.open_with(on_close)
    }

    /// Opens the widget and resolves with the event once the host calls back.
    ///
    /// Listeners are still notified. The future resolves even when a listener
    /// fails; that failure is reported to the host instead.
    pub fn open_async(
        &self,
    ) -> Result<impl Future<Output = Result<CompletionEvent, WidgetError>>, WidgetError> {
        let (sender, receiver) = oneshot::channel();
        let channel = Rc::clone(&self.channel);
        let on_close: CompletionCallback = Box::new(move |error, result| {
            let event = CompletionEvent::from_callback(error, result);
            let dispatched = dispatch(&channel, event.clone());
            // Receiver may already be gone.
            let _ = sender.send(event);
            dispatched?;
            Ok(())
        });
        self.open_with(on_close)?;

        Ok(async move {
            receiver.await.map_err(|_| {
                WidgetError::HostInvocation(
                    "upload widget dropped its callback without reporting".to_string(),
                )
            })
        })
    }

    /// Normalizes a callback payload and publishes it to the listeners.
    pub fn fire_upload_finished(
        &self,
        error: Option<Value>,
        result: Option<Value>,
    ) -> Result<CompletionEvent, WidgetError> {
        dispatch(&self.channel, CompletionEvent::from_callback(error, result))
    }

    fn open_with(&self, on_close: CompletionCallback) -> Result<(), WidgetError> {
        let options = {
            let current = self.options.try_borrow().map_err(|_| {
                WidgetError::InvalidOptions("upload options are being modified".to_string())
            })?;
            current.to_value()
        };
        tracing::info!(
            options = options.as_object().map_or(0, |o| o.len()),
            "Opening upload widget"
        );
        self.host.open(&options, on_close).inspect_err(|err| {
            tracing::warn!(
                error = %err,
                error_code = err.error_code(),
                "Failed to open upload widget"
            );
        })
    }
}

fn borrow_channel(
    channel: &SharedChannel,
) -> Result<std::cell::RefMut<'_, EventChannel<CompletionEvent>>, WidgetError> {
    channel.try_borrow_mut().map_err(|_| WidgetError::Listener {
        source: anyhow::anyhow!(
            "upload listeners cannot be changed while an event is being dispatched"
        ),
    })
}

fn dispatch(channel: &SharedChannel, event: CompletionEvent) -> Result<CompletionEvent, WidgetError> {
    tracing::info!(
        event_type = %event.event_type(),
        records = event.records().len(),
        is_error = event.is_error(),
        "Upload widget closed"
    );
    borrow_channel(channel)?.publish(&event)?;
    Ok(event)
}
