//! "Upload de Documentos" page: attach uploaded files to associates.

use bpc_uploader::{AssociateDocument, DocumentRegistry, DocumentType, Notification, Notifier};
use leptos::*;
use leptos_meta::Title;

use crate::services::{BrowserFile, ToastNotifier};
use crate::{AppError, AppResult, FileUploader, APP_NAME};

/// Attach every accepted file to the selected associate.
fn attach_all(
    registry: &mut DocumentRegistry,
    associate_id: &str,
    document_type: Option<DocumentType>,
    description: &str,
    files: &[BrowserFile],
) -> AppResult<usize> {
    let associate = Some(associate_id).filter(|id| !id.is_empty());
    let today = chrono::Local::now().date_naive();
    for file in files {
        registry.attach(associate, document_type, description, file, today)?;
    }
    Ok(files.len())
}

#[component]
pub fn DocumentUploadPage(notifier: ToastNotifier) -> impl IntoView {
    let registry = create_rw_signal(DocumentRegistry::with_sample_data());
    let (associate_id, set_associate_id) = create_signal(String::new());
    let (document_type, set_document_type) = create_signal(None::<DocumentType>);
    let (description, set_description) = create_signal(String::new());

    let on_files_selected = move |files: Vec<BrowserFile>| {
        let associate = associate_id.get_untracked();
        let doc_type = document_type.get_untracked();
        let text = description.get_untracked();

        let mut result: AppResult<usize> = Ok(0);
        registry.update(|r| result = attach_all(r, &associate, doc_type, &text, &files));

        match result {
            Ok(count) => {
                log::info!("📎 {} document(s) attached to associate {}", count, associate);
                set_description.set(String::new());
            }
            Err(e) => {
                log::warn!("{}", e);
                if let Some(toast) = e.notification() {
                    notifier.notify(toast);
                }
            }
        }
    };

    let on_delete = move |document_id: String| {
        let mut result = Ok(());
        registry.update(|r| result = r.delete(&document_id).map(|_| ()));
        match result.map_err(AppError::from) {
            Ok(()) => notifier.notify(Notification::success(
                "Documento excluído",
                "O documento foi removido com sucesso.",
            )),
            Err(e) => {
                if let Some(toast) = e.notification() {
                    notifier.notify(toast);
                }
            }
        }
    };

    let on_download = move |file_name: String| {
        notifier.notify(Notification::success(
            "Download iniciado",
            format!("Baixando {}...", file_name),
        ));
    };

    let associate_documents = move || {
        let id = associate_id.get();
        registry.with(|r| {
            r.documents_for(&id)
                .into_iter()
                .cloned()
                .collect::<Vec<AssociateDocument>>()
        })
    };

    view! {
        <Title text=format!("Upload de Documentos • {}", APP_NAME)/>
        <div class="container">
            <div class="hero">
                <h1>"Upload de Documentos"</h1>
            </div>

            <div class="grid">
                <div class="card">
                    <div class="card-header">
                        <h2>"Enviar Novo Documento"</h2>
                        <p class="subtitle">
                            "Envie documentos para associados como comprovantes de BPC, "
                            "documentos de identidade e outros."
                        </p>
                    </div>

                    <div class="form-field">
                        <label for="associate">"Associado *"</label>
                        <select
                            id="associate"
                            on:change=move |ev| set_associate_id.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || associate_id.get().is_empty()>
                                "Selecione um associado"
                            </option>
                            {registry.with_untracked(|r| {
                                r.associates()
                                    .iter()
                                    .map(|a| view! {
                                        <option value=a.id.clone()>
                                            {format!("{} - CPF: {}", a.name, a.document_id)}
                                        </option>
                                    })
                                    .collect_view()
                            })}
                        </select>
                    </div>

                    <div class="form-field">
                        <label for="documentType">"Tipo de Documento *"</label>
                        <select
                            id="documentType"
                            on:change=move |ev| {
                                set_document_type.set(event_target_value(&ev).parse().ok())
                            }
                        >
                            <option value="">"Selecione o tipo de documento"</option>
                            {DocumentType::ALL
                                .iter()
                                .map(|t| view! { <option value=t.slug()>{t.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-field">
                        <label for="description">"Descrição"</label>
                        <input
                            id="description"
                            type="text"
                            placeholder="Descrição adicional do documento"
                            prop:value=move || description.get()
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                        />
                    </div>

                    <FileUploader on_files_selected=on_files_selected notifier=notifier/>
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2>"Documentos Recentes"</h2>
                        <p class="subtitle">
                            {move || if associate_id.get().is_empty() {
                                "Selecione um associado para ver seus documentos."
                            } else {
                                "Documentos do associado selecionado."
                            }}
                        </p>
                    </div>

                    <Show
                        when=move || !associate_id.get().is_empty()
                        fallback=|| view! {
                            <p class="empty">"Selecione um associado para ver os documentos."</p>
                        }
                    >
                        <Show
                            when=move || !associate_documents().is_empty()
                            fallback=|| view! { <p class="empty">"Nenhum documento encontrado."</p> }
                        >
                            <div class="document-list">
                                <For
                                    each=associate_documents
                                    key=|doc| doc.id.clone()
                                    children=move |doc| {
                                        let id = doc.id.clone();
                                        let name = doc.file_name.clone();
                                        view! {
                                            <div class="document-item">
                                                <div class="document-icon">
                                                    {if doc.is_pdf() { "📄" } else { "🖼️" }}
                                                </div>
                                                <div class="document-info">
                                                    <p class="document-name">{doc.file_name.clone()}</p>
                                                    <p class="document-meta">
                                                        {format!("{} · {}", doc.document_type.label(), doc.file_size)}
                                                    </p>
                                                </div>
                                                <div class="document-actions">
                                                    <button
                                                        class="btn btn-ghost"
                                                        aria-label="Baixar"
                                                        on:click=move |_| on_download(name.clone())
                                                    >
                                                        "⬇"
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost"
                                                        aria-label="Excluir"
                                                        on:click=move |_| on_delete(id.clone())
                                                    >
                                                        "🗑"
                                                    </button>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </Show>
                    </Show>
                </div>
            </div>
        </div>
    }
}
