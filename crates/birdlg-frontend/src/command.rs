// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! URL actions and the node commands they expand to.

use crate::error::FrontendError;
use std::fmt;
use std::str::FromStr;

/// Endpoint on the node proxy that answers BIRD commands.
pub const BIRD_ENDPOINT: &str = "bird";

/// Endpoint on the node proxy that runs traceroute.
pub const TRACEROUTE_ENDPOINT: &str = "traceroute";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	Summary,
	Detail,
	Route,
	RouteAll,
	RouteWhere,
	RouteWhereAll,
	RouteGeneric,
	Generic,
	Traceroute,
}

impl Action {
	pub const ALL: [Action; 9] = [
		Action::Summary,
		Action::Detail,
		Action::Route,
		Action::RouteAll,
		Action::RouteWhere,
		Action::RouteWhereAll,
		Action::RouteGeneric,
		Action::Generic,
		Action::Traceroute,
	];

	/// First path segment that selects this action.
	pub fn name(self) -> &'static str {
		match self {
			Action::Summary => "summary",
			Action::Detail => "detail",
			Action::Route => "route",
			Action::RouteAll => "route_all",
			Action::RouteWhere => "route_where",
			Action::RouteWhereAll => "route_where_all",
			Action::RouteGeneric => "route_generic",
			Action::Generic => "generic",
			Action::Traceroute => "traceroute",
		}
	}

	pub fn endpoint(self) -> &'static str {
		match self {
			Action::Traceroute => TRACEROUTE_ENDPOINT,
			_ => BIRD_ENDPOINT,
		}
	}

	/// Command pattern; `%s` is replaced by the URL arguments.
	pub fn pattern(self) -> &'static str {
		match self {
			Action::Summary => "show protocols",
			Action::Detail => "show protocols all %s",
			Action::Route => "show route for %s",
			Action::RouteAll => "show route for %s all",
			Action::RouteWhere => "show route where net ~ [ %s ]",
			Action::RouteWhereAll => "show route where net ~ [ %s ] all",
			Action::RouteGeneric => "show route %s",
			Action::Generic => "show %s",
			Action::Traceroute => "%s",
		}
	}

	/// The command sent to every node, surrounding whitespace trimmed.
	pub fn command(self, args: &str) -> String {
		self.pattern().replace("%s", args).trim().to_string()
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Action {
	type Err = FrontendError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Action::ALL
			.into_iter()
			.find(|action| action.name() == s)
			.ok_or_else(|| FrontendError::UnknownAction(s.to_string()))
	}
}
