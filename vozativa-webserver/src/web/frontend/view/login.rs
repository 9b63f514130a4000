use maud::{html, Markup};
use rocket::request::FlashMessage;

use super::*;

pub fn login(flash: Option<FlashMessage>, site_key: Option<&str>) -> Markup {
    page(
        "Entrar",
        None,
        flash,
        html! {
            h2 { "Entrar" }
            form class="auth-form" action="/users/login" method="POST" {
                fieldset {
                    label {
                        "E-mail"
                        input type="email" name="email" placeholder="email@exemplo.com" required;
                    }
                    label {
                        "Senha"
                        input type="password" name="password" placeholder="senha" required;
                    }
                    (verification_widget(site_key))
                    input type="submit" value="Entrar";
                }
            }
            p {
                "Ainda não tem uma conta? "
                a href="/users/register" { "Cadastre-se" }
            }
        },
    )
}
