use maud::{html, Markup};
use rocket::request::FlashMessage;

use super::*;

/// Previously typed values that survive a failed submission.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisterPrefill<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub profession: &'a str,
    pub bio: &'a str,
}

pub fn register(
    flash: Option<FlashMessage>,
    errors: &[String],
    prefill: &RegisterPrefill<'_>,
    site_key: Option<&str>,
) -> Markup {
    page(
        "Cadastrar",
        None,
        flash,
        html! {
            h2 { "Criar conta" }
            @if !errors.is_empty() {
                ul class="form-errors" {
                    @for error in errors {
                        li { (error) }
                    }
                }
            }
            form class="auth-form" action="/users/register" method="POST" {
                fieldset {
                    label {
                        "Nome completo"
                        input type="text" name="name" value=(prefill.name) required;
                    }
                    label {
                        "E-mail"
                        input type="email" name="email" value=(prefill.email) required;
                    }
                    label {
                        "Profissão (opcional)"
                        input type="text" name="profession" value=(prefill.profession);
                    }
                    label {
                        "Sobre você (opcional)"
                        textarea name="bio" rows="3" { (prefill.bio) }
                    }
                    label {
                        "Foto de perfil (URL, opcional)"
                        input type="url" name="avatar_url";
                    }
                    label {
                        "Senha"
                        input type="password" name="password" required;
                    }
                    label {
                        "Confirme a senha"
                        input type="password" name="confirm_password" required;
                    }
                    (verification_widget(site_key))
                    input type="submit" value="Cadastrar";
                }
            }
            p {
                "Já tem uma conta? "
                a href="/users/login" { "Entrar" }
            }
        },
    )
}
