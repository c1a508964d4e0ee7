//! Navigation bar

use leptos::*;
use leptos_router::*;

use crate::APP_NAME;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="navbar">
            <div class="header-left">
                <A href="/" class="logo">{APP_NAME}</A>
            </div>
            <nav class="header-right">
                <A href="/documentos/upload" class="nav-link" active_class="active">
                    "Upload de Documentos"
                </A>
            </nav>
        </header>
    }
}
