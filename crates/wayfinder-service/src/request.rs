//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use wayfinder_lib::{RouteQuery, RouteType};

use crate::problem::ProblemDetails;

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/route`, as submitted by the web form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Starting system name.
    pub start: String,

    /// Destination system name.
    pub end: String,

    /// Route type name: shortest, safest or insecure.
    #[serde(default)]
    pub pathing: Option<String>,

    /// Allow end-of-life wormholes.
    #[serde(default)]
    pub eol: bool,

    /// Allow critical-mass wormholes.
    #[serde(default)]
    pub crit: bool,

    /// Systems to avoid. Blank entries are ignored.
    #[serde(default)]
    pub avoid: Vec<String>,

    /// Siggy chain map overriding the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

impl RouteRequest {
    fn avoided(&self) -> impl Iterator<Item = &str> {
        self.avoid
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }

    /// Library query for this request. Call [`Validate::validate`] first.
    pub fn to_query(&self) -> Result<RouteQuery, wayfinder_lib::Error> {
        let route_type = match self.pathing.as_deref().map(str::trim) {
            None | Some("") => RouteType::default(),
            Some(name) => name.parse()?,
        };

        Ok(RouteQuery {
            start: self.start.trim().to_string(),
            goal: self.end.trim().to_string(),
            route_type,
            allow_eol: self.eol,
            allow_critical: self.crit,
            avoid: self.avoided().map(str::to_string).collect(),
        })
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.start.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'start' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.end.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'end' field is required and cannot be empty",
                request_id,
            )));
        }

        if let Some(name) = self
            .avoided()
            .find(|name| *name == self.start.trim() || *name == self.end.trim())
        {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("Cannot avoid '{}': it is an endpoint of the route", name),
                request_id,
            )));
        }

        if let Err(err) = self.to_query() {
            return Err(Box::new(ProblemDetails::bad_request(
                err.to_string(),
                request_id,
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str) -> RouteRequest {
        RouteRequest {
            start: start.to_string(),
            end: end.to_string(),
            ..RouteRequest::default()
        }
    }

    #[test]
    fn web_form_body_deserialises() {
        let body = r#"{"start": "Jita", "end": "Amarr", "pathing": "safest",
                       "eol": true, "crit": false, "avoid": [""]}"#;
        let request: RouteRequest = serde_json::from_str(body).expect("valid body");
        assert!(request.validate("req").is_ok());

        let query = request.to_query().expect("query");
        assert_eq!(query.route_type, RouteType::Safest);
        assert!(query.allow_eol);
        assert!(query.avoid.is_empty());
    }

    #[test]
    fn missing_pathing_defaults_to_shortest() {
        let query = request("Jita", "Amarr").to_query().expect("query");
        assert_eq!(query.route_type, RouteType::Shortest);
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let problem = request("  ", "Amarr").validate("req-1").expect_err("blank start");
        assert_eq!(problem.status, 400);
        assert!(problem.detail.unwrap_or_default().contains("'start'"));
    }

    #[test]
    fn unknown_pathing_is_rejected() {
        let mut body = request("Jita", "Amarr");
        body.pathing = Some("fastest".to_string());
        let problem = body.validate("req-2").expect_err("bad route type");
        assert_eq!(problem.status, 400);
        assert!(problem.detail.unwrap_or_default().contains("fastest"));
    }

    #[test]
    fn avoiding_an_endpoint_is_rejected() {
        let mut body = request("Jita", "Amarr");
        body.avoid = vec!["Amarr".to_string()];
        let problem = body.validate("req-3").expect_err("avoids goal");
        assert!(problem.detail.unwrap_or_default().contains("Amarr"));
    }
}
