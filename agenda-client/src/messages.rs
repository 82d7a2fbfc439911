//! Localized user-facing texts (toasts and validation messages)

use std::fmt;
use std::str::FromStr;

/// Message language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-ar" | "es-es" => Ok(Self::Es),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Es => "es",
            Self::En => "en",
        })
    }
}

/// Managed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Client,
    Professional,
    Service,
    Appointment,
    Business,
}

/// Mutation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
    Cancel,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Cancel => "cancel",
        }
    }
}

/// Success toast for a finished mutation.
pub fn success(locale: Locale, entity: Entity, action: Action) -> &'static str {
    use Action::*;
    use Entity::*;
    match locale {
        Locale::Es => match (entity, action) {
            (Client, Create) => "Cliente creado",
            (Client, Update) => "Cliente actualizado",
            (Client, _) => "Cliente eliminado",
            (Professional, Create) => "Profesional creado",
            (Professional, Update) => "Profesional actualizado",
            (Professional, _) => "Profesional eliminado del equipo",
            (Service, Create) => "Servicio creado",
            (Service, Update) => "Servicio actualizado",
            (Service, _) => "Servicio eliminado",
            (Appointment, Create) => "Turno creado correctamente",
            (Appointment, Update) => "Turno actualizado",
            (Appointment, Cancel) => "Turno cancelado",
            (Appointment, Delete) => "Turno eliminado",
            (Business, Create) => "Negocio creado correctamente",
            (Business, Update) => "Negocio actualizado",
            (Business, _) => "Negocio eliminado",
        },
        Locale::En => match (entity, action) {
            (Client, Create) => "Client created",
            (Client, Update) => "Client updated",
            (Client, _) => "Client deleted",
            (Professional, Create) => "Professional created",
            (Professional, Update) => "Professional updated",
            (Professional, _) => "Professional removed from the team",
            (Service, Create) => "Service created",
            (Service, Update) => "Service updated",
            (Service, _) => "Service deleted",
            (Appointment, Create) => "Appointment created",
            (Appointment, Update) => "Appointment updated",
            (Appointment, Cancel) => "Appointment cancelled",
            (Appointment, Delete) => "Appointment deleted",
            (Business, Create) => "Business created",
            (Business, Update) => "Business updated",
            (Business, _) => "Business deleted",
        },
    }
}

/// Fallback error toast when the backend gives no usable message.
pub fn failure(locale: Locale, entity: Entity, action: Action) -> &'static str {
    use Action::*;
    use Entity::*;
    match locale {
        Locale::Es => match (entity, action) {
            (Client, Create) => "No se pudo crear el cliente",
            (Client, Update) => "No se pudo actualizar al cliente",
            (Client, _) => "No se pudo eliminar al cliente",
            (Professional, Create) => "No se pudo crear el profesional",
            (Professional, Update) => "No se pudo actualizar el profesional",
            (Professional, _) => "No se pudo eliminar el profesional",
            (Service, Create) => "No se pudo crear el servicio",
            (Service, Update) => "No se pudo actualizar el servicio",
            (Service, _) => "No se pudo eliminar el servicio",
            (Appointment, Create) => "No se pudo crear el turno",
            (Appointment, Update) => "No se pudo actualizar el turno",
            (Appointment, Cancel) => "No se pudo cancelar el turno",
            (Appointment, Delete) => "No se pudo eliminar el turno",
            (Business, Create) => "No se pudo crear el negocio",
            (Business, Update) => "No se pudo actualizar el negocio",
            (Business, _) => "No se pudo eliminar el negocio",
        },
        Locale::En => match (entity, action) {
            (Client, Create) => "Could not create the client",
            (Client, Update) => "Could not update the client",
            (Client, _) => "Could not delete the client",
            (Professional, Create) => "Could not create the professional",
            (Professional, Update) => "Could not update the professional",
            (Professional, _) => "Could not delete the professional",
            (Service, Create) => "Could not create the service",
            (Service, Update) => "Could not update the service",
            (Service, _) => "Could not delete the service",
            (Appointment, Create) => "Could not create the appointment",
            (Appointment, Update) => "Could not update the appointment",
            (Appointment, Cancel) => "Could not cancel the appointment",
            (Appointment, Delete) => "Could not delete the appointment",
            (Business, Create) => "Could not create the business",
            (Business, Update) => "Could not update the business",
            (Business, _) => "Could not delete the business",
        },
    }
}

/// Validation and screen messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    NameRequired,
    NameTooShort,
    EmailRequired,
    EmailInvalid,
    PhoneRequired,
    PhoneTooShort,
    DurationRequired,
    DurationPositive,
    DurationTooLong,
    PriceNegative,
    MaxConcurrentRequired,
    MaxConcurrentMin,
    MaxConcurrentTooHigh,
    ServicesRequired,
    DayOfWeekInvalid,
    TimeOffIncomplete,
    TimeOffOrder,
    ClientRequired,
    ProfessionalRequired,
    ServiceRequired,
    StartRequired,
    StartInvalid,
    StartInPast,
    IntervalMin,
    TimezoneUnknown,
    NoBusinessToSave,
    GenericError,
}

impl Text {
    const CODES: [(Text, &'static str); 27] = [
        (Text::NameRequired, "name_required"),
        (Text::NameTooShort, "name_too_short"),
        (Text::EmailRequired, "email_required"),
        (Text::EmailInvalid, "email_invalid"),
        (Text::PhoneRequired, "phone_required"),
        (Text::PhoneTooShort, "phone_too_short"),
        (Text::DurationRequired, "duration_required"),
        (Text::DurationPositive, "duration_positive"),
        (Text::DurationTooLong, "duration_too_long"),
        (Text::PriceNegative, "price_negative"),
        (Text::MaxConcurrentRequired, "max_concurrent_required"),
        (Text::MaxConcurrentMin, "max_concurrent_min"),
        (Text::MaxConcurrentTooHigh, "max_concurrent_too_high"),
        (Text::ServicesRequired, "services_required"),
        (Text::DayOfWeekInvalid, "day_of_week_invalid"),
        (Text::TimeOffIncomplete, "time_off_incomplete"),
        (Text::TimeOffOrder, "time_off_order"),
        (Text::ClientRequired, "client_required"),
        (Text::ProfessionalRequired, "professional_required"),
        (Text::ServiceRequired, "service_required"),
        (Text::StartRequired, "start_required"),
        (Text::StartInvalid, "start_invalid"),
        (Text::StartInPast, "start_in_past"),
        (Text::IntervalMin, "interval_min"),
        (Text::TimezoneUnknown, "timezone_unknown"),
        (Text::NoBusinessToSave, "no_business"),
        (Text::GenericError, "generic_error"),
    ];

    /// Stable code used in validation attributes
    pub fn code(&self) -> &'static str {
        Self::CODES
            .iter()
            .find(|(text, _)| text == self)
            .map(|(_, code)| *code)
            .unwrap_or("generic_error")
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(text, _)| *text)
    }
}

/// Localized text for a validation/screen message.
pub fn text(locale: Locale, key: Text) -> &'static str {
    use Text::*;
    match locale {
        Locale::Es => match key {
            NameRequired => "El nombre es obligatorio",
            NameTooShort => "Debe tener al menos 2 caracteres",
            EmailRequired => "El email es obligatorio",
            EmailInvalid => "Email inválido",
            PhoneRequired => "El telefono es obligatorio",
            PhoneTooShort => "Demasiado corto",
            DurationRequired => "La duración es obligatoria",
            DurationPositive => "La duración debe ser mayor a 0",
            DurationTooLong => "La duración es demasiado larga",
            PriceNegative => "El precio no puede ser negativo",
            MaxConcurrentRequired => "Indicá el máximo de turnos simultáneos",
            MaxConcurrentMin => "Debe ser al menos 1",
            MaxConcurrentTooHigh => "El máximo es demasiado alto",
            ServicesRequired => "Seleccioná al menos un servicio",
            DayOfWeekInvalid => "Día de la semana inválido",
            TimeOffIncomplete => "Completa las fechas de bloqueo",
            TimeOffOrder => "La fecha de inicio debe ser anterior a la de fin",
            ClientRequired => "Seleccioná un cliente",
            ProfessionalRequired => "Seleccioná un profesional",
            ServiceRequired => "Seleccioná un servicio",
            StartRequired => "Indicá la fecha y hora de inicio",
            StartInvalid => "Fecha y hora inválidas",
            StartInPast => "El turno no puede estar en el pasado",
            IntervalMin => "El intervalo debe ser de al menos 5 minutos",
            TimezoneUnknown => "Zona horaria desconocida",
            NoBusinessToSave => "No hay negocio para guardar.",
            GenericError => "Ocurrió un error",
        },
        Locale::En => match key {
            NameRequired => "Name is required",
            NameTooShort => "Must be at least 2 characters",
            EmailRequired => "Email is required",
            EmailInvalid => "Invalid email",
            PhoneRequired => "Phone is required",
            PhoneTooShort => "Too short",
            DurationRequired => "Duration is required",
            DurationPositive => "Duration must be greater than 0",
            DurationTooLong => "Duration is too long",
            PriceNegative => "Price cannot be negative",
            MaxConcurrentRequired => "Set the maximum concurrent appointments",
            MaxConcurrentMin => "Must be at least 1",
            MaxConcurrentTooHigh => "Maximum is too high",
            ServicesRequired => "Select at least one service",
            DayOfWeekInvalid => "Invalid day of week",
            TimeOffIncomplete => "Fill in the time-off dates",
            TimeOffOrder => "Start must be before end",
            ClientRequired => "Select a client",
            ProfessionalRequired => "Select a professional",
            ServiceRequired => "Select a service",
            StartRequired => "Set the start date and time",
            StartInvalid => "Invalid date and time",
            StartInPast => "Start cannot be in the past",
            IntervalMin => "Interval must be at least 5 minutes",
            TimezoneUnknown => "Unknown timezone",
            NoBusinessToSave => "There is no business to save.",
            GenericError => "Something went wrong",
        },
    }
}
