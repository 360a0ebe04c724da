//! Canned job descriptors served by the job info endpoint.
//!
//! `{addr}` in each template is replaced with the serving address.

const ADDR_PLACEHOLDER: &str = "{addr}";

const NO_PARAMETERS: &str = r#"{
	"name": "job-no-parameters",
	"url": "http://{addr}/job/job-no-parameters/",
	"property": []
}"#;

const WITH_PARAMETERS: &str = r#"{
	"name": "job-with-parameters",
	"url": "http://{addr}/job/job-with-parameters/",
	"property": [
		{
			"_class": "hudson.model.ParametersDefinitionProperty",
			"parameterDefinitions": [
				{
					"_class": "hudson.model.StringParameterDefinition",
					"defaultParameterValue": {
						"_class": "hudson.model.StringParameterValue",
						"name": "anything",
						"value": "something"
					},
					"description": null,
					"name": "anything",
					"type": "StringParameterDefinition"
				}
			]
		}
	]
}"#;

const WITH_SOURCE_PARAMETERS: &str = r#"{
	"name": "job-with-source-parameters",
	"url": "http://{addr}/job/job-with-source-parameters/",
	"property": [
		{
			"_class": "hudson.model.ParametersDefinitionProperty",
			"parameterDefinitions": [
				{
					"_class": "hudson.model.StringParameterDefinition",
					"defaultParameterValue": {
						"_class": "hudson.model.StringParameterValue",
						"name": "SOURCE_URL",
						"value": "something"
					},
					"description": null,
					"name": "SOURCE_URL",
					"type": "StringParameterDefinition"
				},
				{
					"_class": "hudson.model.StringParameterDefinition",
					"defaultParameterValue": {
						"_class": "hudson.model.StringParameterValue",
						"name": "SOURCE_REVISION",
						"value": "something"
					},
					"description": null,
					"name": "SOURCE_REVISION",
					"type": "StringParameterDefinition"
				}
			]
		}
	]
}"#;

/// The jobs the job info endpoint knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureJob {
    /// `job-no-parameters`: declares no parameters.
    NoParameters,
    /// `job-with-parameters`: one string parameter, `anything`.
    WithParameters,
    /// `job-with-source-parameters`: `SOURCE_URL` and `SOURCE_REVISION`.
    WithSourceParameters,
}

impl FixtureJob {
    pub const ALL: [FixtureJob; 3] = [
        FixtureJob::NoParameters,
        FixtureJob::WithParameters,
        FixtureJob::WithSourceParameters,
    ];

    /// Looks up a fixture by exact job name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FixtureJob::NoParameters => "job-no-parameters",
            FixtureJob::WithParameters => "job-with-parameters",
            FixtureJob::WithSourceParameters => "job-with-source-parameters",
        }
    }

    /// Renders the job descriptor JSON with `serving_addr` in the `url` field.
    pub fn descriptor(&self, serving_addr: &str) -> String {
        let template = match self {
            FixtureJob::NoParameters => NO_PARAMETERS,
            FixtureJob::WithParameters => WITH_PARAMETERS,
            FixtureJob::WithSourceParameters => WITH_SOURCE_PARAMETERS,
        };
        template.replace(ADDR_PLACEHOLDER, serving_addr)
    }
}
