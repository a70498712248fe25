//! Wire payload types for the ticketing API.
//!
//! The API speaks loosely-typed JSON with Spanish field names. Everything is
//! decoded here, at the edge, into the validated core types; nothing past
//! this module touches a raw payload. Fields the API sometimes omits are
//! `Option` and collapse to defaults during conversion.

use serde::{Deserialize, Serialize};

use abordo_core::routes::RouteSheet;
use abordo_core::tickets::Ticket;

/// Body of `POST auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// Driver's email address.
    pub email: String,

    /// Driver's password.
    pub password: String,
}

/// Response of `POST auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Bearer token; present only on success.
    pub access_token: Option<String>,

    /// The authenticated account, when the login succeeded.
    pub user: Option<WireUser>,
}

/// Account data embedded in the login response.
#[derive(Debug, Deserialize)]
pub struct WireUser {
    /// Given name.
    pub nombre: Option<String>,

    /// Family name.
    pub apellido: Option<String>,

    /// Whether the account is active. Absent means active.
    pub activo: Option<bool>,

    /// Account role; drivers are role 3.
    pub rol: Option<i64>,
}

/// Envelope of `GET hoja-trabajo/chofer/mis-programadas`.
#[derive(Debug, Deserialize)]
pub struct SheetsEnvelope {
    /// Today's assigned route sheets; absent means none.
    pub data: Option<Vec<WireRouteSheet>>,
}

/// One route sheet as the API sends it.
#[derive(Debug, Deserialize)]
pub struct WireRouteSheet {
    /// Sheet id.
    pub id: i64,

    /// Route code.
    pub codigo: Option<String>,

    /// Origin city.
    pub ciudad_origen: Option<String>,

    /// Destination city.
    pub ciudad_destino: Option<String>,

    /// Scheduled departure time.
    #[serde(rename = "horaSalidaProg")]
    pub hora_salida_prog: Option<String>,

    /// Bus license plate.
    pub placa: Option<String>,

    /// Whether the bus is a double-decker.
    pub piso_doble: Option<bool>,

    /// Seats on floor 1.
    pub total_asientos: Option<u32>,

    /// Seats on floor 2.
    pub total_asientos_piso2: Option<u32>,
}

impl From<WireRouteSheet> for RouteSheet {
    fn from(wire: WireRouteSheet) -> Self {
        Self {
            id: wire.id,
            code: wire.codigo.unwrap_or_else(|| "Ruta".to_string()),
            origin_city: wire.ciudad_origen.unwrap_or_default(),
            destination_city: wire.ciudad_destino.unwrap_or_default(),
            scheduled_departure: wire.hora_salida_prog.unwrap_or_default(),
            bus_plate: wire.placa.filter(|p| !p.trim().is_empty()),
            has_second_floor: wire.piso_doble.unwrap_or(false),
            seat_count_floor1: wire.total_asientos.unwrap_or(0),
            seat_count_floor2: wire.total_asientos_piso2,
        }
    }
}

/// A JSON value that arrives as either a number or a string, depending on
/// the printer batch that issued the ticket.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    /// Numeric form.
    Number(i64),
    /// String form.
    String(String),
}

impl NumberOrString {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::String(s) => s,
        }
    }
}

/// One ticket as the API sends it.
#[derive(Debug, Deserialize)]
pub struct WireTicket {
    /// Ticket id.
    pub id: i64,

    /// Passenger's full name.
    pub pasajero: Option<String>,

    /// Passenger's national identity number.
    pub cedula: Option<String>,

    /// Seat number; may carry leading zeros and may arrive as a number.
    #[serde(rename = "asientoNumero")]
    pub asiento_numero: Option<NumberOrString>,

    /// Fare before discount.
    #[serde(rename = "precioBruto")]
    pub precio_bruto: Option<f64>,

    /// Discount applied.
    pub descuento: Option<f64>,

    /// Fare paid.
    #[serde(rename = "precioNeto")]
    pub precio_neto: Option<f64>,

    /// Whether the ticket has been validated as boarded.
    pub usado: Option<bool>,
}

impl From<WireTicket> for Ticket {
    fn from(wire: WireTicket) -> Self {
        Self {
            id: wire.id,
            passenger_name: wire.pasajero.unwrap_or_default(),
            national_id: wire.cedula.unwrap_or_default(),
            seat_number: wire
                .asiento_numero
                .map(NumberOrString::into_string)
                .unwrap_or_default(),
            fare_gross: wire.precio_bruto.unwrap_or(0.0),
            discount: wire.descuento.unwrap_or(0.0),
            fare_net: wire.precio_neto.unwrap_or(0.0),
            boarded: wire.usado.unwrap_or(false),
        }
    }
}

/// Error envelope the API attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable failure message.
    pub message: Option<String>,
}
