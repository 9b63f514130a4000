use maud::{html, Markup, DOCTYPE};
use rocket::request::FlashMessage;

use vozativa_core::entities::{Role, User};

pub fn page(
    title: &str,
    user: Option<&User>,
    flash: Option<FlashMessage>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/main.css";
            }
            body {
                (header(user))
                (flash_banner(flash))
                main { (content) }
                footer {
                    p { "Portal Voz Ativa" }
                }
            }
        }
    }
}

fn header(user: Option<&User>) -> Markup {
    html! {
        header {
            nav {
                a class="brand" href="/" { "Voz Ativa" }
                a href="/categories" { "Categorias" }
                @match user {
                    Some(user) => {
                        @if user.role >= Role::Admin {
                            a href="/admin" { "Administração" }
                        }
                        a href="/users/profile" { (user.name) }
                        a href="/users/logout" { "Sair" }
                    }
                    None => {
                        a href="/users/login" { "Entrar" }
                        a href="/users/register" { "Cadastrar" }
                    }
                }
            }
        }
    }
}

fn flash_banner(flash: Option<FlashMessage>) -> Markup {
    html! {
        @if let Some(flash) = flash {
            div class=(format!("flash {}", flash.kind())) { (flash.message()) }
        }
    }
}
