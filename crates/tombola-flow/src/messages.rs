// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing message texts, Spanish like the audience.
//!
//! Centralized so the state machine reads as transitions and the wording
//! can change without touching control flow. Tests assert on substrings,
//! not whole messages.

pub fn greeting(name: &str) -> String {
    format!("👋 Hola, {name}. Para validar tu registro, por favor envíame tu número de cédula.")
}

pub fn identity_not_understood() -> String {
    "No he podido identificar un número de cédula válido en tu mensaje. Por favor, envía solo \
     tu número de cédula (entre 6 y 10 dígitos)."
        .to_string()
}

pub fn identity_example() -> String {
    "Ejemplo de formato correcto: 12345678".to_string()
}

pub fn identity_unknown(identity_number: &str) -> String {
    format!("El número de cédula {identity_number} no está registrado en nuestra base de datos.")
}

pub fn offer_registration() -> String {
    "¿Te gustaría registrarte con esta cédula para participar en la tómbola?".to_string()
}

pub fn registered_without_ticket(identity_number: &str) -> String {
    format!("La cédula {identity_number} está registrada en el sistema pero aún no tiene un ticket.")
}

pub fn phone_prompt() -> String {
    "Por favor, envíame tu número de teléfono (con formato 04XX-XXXXXXX):".to_string()
}

pub fn phone_not_understood() -> String {
    "No he podido identificar un número de teléfono válido. Por favor, envía tu número con \
     formato 04XX-XXXXXXX:"
        .to_string()
}

pub fn phone_conflict(phone: &str, identity_number: &str) -> String {
    format!(
        "El teléfono {phone} ya está registrado con la cédula {identity_number}. Por favor, \
         envíame un número de teléfono diferente:"
    )
}

pub fn ticket_check_unavailable() -> String {
    "No pudimos verificar si ya tienes un ticket. Para continuar con el registro, por favor \
     envíame tu número de teléfono (con formato 04XX-XXXXXXX):"
        .to_string()
}

pub fn referrer_prompt() -> String {
    "Si un promotor te invitó, envíame su código. Si no tienes uno, responde 0:".to_string()
}

pub fn referrer_unknown() -> String {
    "No encontramos ese código de promotor. Revísalo e inténtalo de nuevo, o responde 0 para \
     continuar sin promotor:"
        .to_string()
}

pub fn processing(identity_number: &str, phone: &str) -> String {
    format!("Estoy procesando tu registro con la cédula {identity_number} y el teléfono {phone}...")
}

pub fn registration_complete() -> String {
    "¡Felicidades! Tu registro ha sido completado exitosamente.".to_string()
}

pub fn welcome_with_ticket() -> String {
    "¡Bienvenido a la tómbola! Tu ticket ha sido generado.\n\n\
     Es importante que guardes nuestro contacto, así podremos anunciarte si eres el afortunado \
     ganador.\nNo pierdas tu ticket y guarda nuestro contacto, ¡prepárate para celebrar!\n\n\
     ¡Mucha suerte!"
        .to_string()
}

pub fn existing_ticket(full_name: &str, ticket_id: i64) -> String {
    format!(
        "{full_name}, ¡hoy es tu día de suerte!\n\n\
         Ya estás participando en la tómbola y este es tu número de ticket: {ticket_id}. \
         ¡El número ganador!\n\n\
         Es importante que guardes nuestro contacto, así podremos anunciarte que tú eres el \
         afortunado ganador.\nNo pierdas tu número de ticket, ¡prepárate para celebrar!\n\n\
         ¡Mucha suerte!"
    )
}

pub fn qr_caption(ticket_id: i64) -> String {
    format!("Tu ticket #{ticket_id}")
}

pub fn main_menu(name: &str) -> String {
    format!(
        "Hola {name}, estamos aquí para ayudarte. ¿Qué te gustaría hacer?\n\n\
         *1.* Registrarme en la tómbola 📝\n\
         *2.* Visitar nuestro sitio web 🌐\n\
         *3.* Unirme a nuestro canal 📣\n\
         *4.* Verificar otra cédula 🔢\n\
         *5.* Finalizar conversación 👋\n\n\
         Responde con el *número* de la opción deseada."
    )
}

pub fn main_menu_invalid() -> String {
    "No he podido entender tu selección. Por favor, responde con el número de la opción \
     deseada (1, 2, 3, 4 o 5):"
        .to_string()
}

pub fn post_menu() -> String {
    "¿Qué te gustaría hacer ahora?\n\n\
     *1.* Visitar nuestro sitio web 🌐\n\
     *2.* Unirte a nuestro canal 📣\n\
     *3.* Regresar al menú principal 🔄\n\
     *4.* Finalizar conversación 👋\n\n\
     Responde con el *número* de la opción deseada."
        .to_string()
}

pub fn post_menu_invalid() -> String {
    "No he podido entender tu selección. Por favor, responde con el número de la opción \
     deseada (1, 2, 3 o 4):"
        .to_string()
}

pub fn register_prompt() -> String {
    "¡Excelente! Para registrarte, por favor envíame tu número de cédula:".to_string()
}

pub fn verify_other_prompt() -> String {
    "Por favor, envíame el número de cédula que deseas verificar:".to_string()
}

pub fn website(url: &str) -> String {
    format!("¡Excelente! Puedes visitar nuestro sitio web en:\n{url}")
}

pub fn channel(url: &str) -> String {
    format!("¡Genial! Únete a nuestro canal para recibir noticias y actualizaciones:\n{url}")
}

pub fn back_to_main_menu() -> String {
    "Regresando al menú principal...".to_string()
}

pub fn goodbye(name: &str) -> String {
    format!(
        "¡Gracias por contactarnos, {name}! Esperamos verte pronto. ¡Que tengas un excelente \
         día! 🍀"
    )
}

pub fn goodbye_registered(name: &str) -> String {
    format!(
        "¡Gracias por registrarte, {name}! Estamos emocionados de tenerte como participante. \
         Te notificaremos si eres el ganador. ¡Buena suerte! 🍀"
    )
}

pub fn something_went_wrong() -> String {
    "Ha ocurrido un error al procesar tu solicitud. Por favor, intenta nuevamente más tarde."
        .to_string()
}

pub fn liveness_challenge() -> String {
    "¿Sigues ahí? Responde cualquier mensaje para continuar con tu registro.".to_string()
}

pub fn session_expired() -> String {
    "Tu sesión ha finalizado debido a inactividad. Envía cualquier mensaje para comenzar de \
     nuevo."
        .to_string()
}
