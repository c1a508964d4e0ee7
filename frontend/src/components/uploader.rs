//! Drag & drop file uploader.
//!
//! Validates the picked files against an [`UploadPolicy`], runs a simulated
//! upload session with a progress bar, then hands the accepted files to
//! `on_files_selected`. Rejections and completion are reported as toasts.
//! A session still running when the component unmounts is cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use bpc_uploader::{CancelGuard, Progress, SessionOutcome, UploadPolicy, Uploader};
use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::services::{candidates_from_drop, candidates_from_input, BrowserFile, ToastNotifier};
use crate::{UploadProgress, DEFAULT_INPUT_ID};

#[component]
pub fn FileUploader(
    /// Files accepted after the simulated upload
    #[prop(into)]
    on_files_selected: Callback<Vec<BrowserFile>>,
    /// Where rejections and completion are reported
    notifier: ToastNotifier,
    /// Acceptance rules (PDF/JPEG/PNG, 5 MB, single file by default)
    #[prop(optional)]
    policy: Option<UploadPolicy>,
    /// Id of the hidden file input
    #[prop(optional, into)]
    input_id: Option<String>,
) -> impl IntoView {
    let policy = policy.unwrap_or_default();
    let input_id = input_id.unwrap_or_else(|| DEFAULT_INPUT_ID.to_string());
    let multiple = policy.allow_multiple;
    let accept = policy.accept_attribute();
    let hint = policy.size_hint();

    let uploader = store_value(Uploader::new(policy, notifier));
    let (is_dragging, set_is_dragging) = create_signal(false);
    let (progress, set_progress) = create_signal(Progress::Idle);

    // Cancel the running session, if any, when the view goes away
    let teardown: Rc<RefCell<Option<CancelGuard>>> = Rc::new(RefCell::new(None));
    on_cleanup({
        let teardown = Rc::clone(&teardown);
        move || {
            if teardown.borrow_mut().take().is_some() {
                log::info!("Uploader unmounted, cancelling session");
            }
        }
    });

    let start_upload = Callback::new(move |files: Vec<BrowserFile>| {
        if files.is_empty() {
            return;
        }

        let session = match uploader.with_value(|u| u.submit(files)) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Upload not started: {}", e);
                return;
            }
        };

        *teardown.borrow_mut() = Some(session.handle().cancel_on_drop());
        let teardown = Rc::clone(&teardown);

        spawn_local(async move {
            let outcome = session
                .run(
                    gloo_timers::future::sleep,
                    move |p| set_progress.set(p),
                    move |files| on_files_selected.call(files),
                )
                .await;

            if let SessionOutcome::Completed { .. } = outcome {
                if let Some(guard) = teardown.borrow_mut().take() {
                    guard.disarm();
                }
            }
        });
    });

    let on_drag_enter = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(true);
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(false);
        start_upload.call(candidates_from_drop(&ev));
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        start_upload.call(candidates_from_input(&input));
    };

    let (select_hint, button_label) = if multiple {
        ("ou clique para selecionar arquivos", "Selecionar arquivos")
    } else {
        ("ou clique para selecionar um arquivo", "Selecionar arquivo")
    };

    view! {
        <div
            class="upload-section"
            class:dragging=move || is_dragging.get()
            on:dragenter=on_drag_enter
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">"Arraste e solte arquivos aqui"</div>
            <div class="upload-hint">{select_hint}</div>

            <label for=input_id.clone() class="upload-button">
                {button_label}
            </label>
            <input
                type="file"
                id=input_id
                accept=accept
                multiple=multiple
                style="display:none"
                disabled=move || progress.get().is_running()
                on:change=on_file_change
            />

            <div class="upload-hint mt-20">{hint}</div>

            <UploadProgress progress=progress/>
        </div>
    }
}
