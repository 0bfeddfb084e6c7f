//! Node tables for the Swagger 1.2 resource listing and API declaration
//! documents. Leaves are declared first so every `Shape::node` points at an
//! already-built node.

use crate::node::{SchemaNode, Shape};
use crate::registry::{Registry, SWAGGER_VERSION};

const PARAM_TYPES: &[&str] = &["path", "query", "body", "header", "form"];
const HTTP_METHODS: &[&str] = &["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

const SWAGGER_VERSION_DOC: &str = "Specifies the Swagger Specification version being used. \
     It can be used by the Swagger UI and other clients to interpret the API listing. \
     The value MUST be an existing Swagger specification version.";
const API_VERSION_DOC: &str = "Provides the version of the application API \
     (not to be confused by the specification version).";
const BASE_PATH_DOC: &str = "The root URL serving the API. The value SHOULD be in the format of a URL.";
const AUTHORIZATIONS_DOC: &str =
    "Provides information about the authorization schemes allowed on this API.";

/// A list of MIME types.
fn mime_types() -> Shape {
    Shape::array_of(Shape::string())
}

pub(crate) fn swagger_1_2() -> Registry {
    let swagger_version = || Shape::one_of(&[SWAGGER_VERSION]);

    let items = SchemaNode::builder("Items")
        .optional("type", Shape::string(), "")
        .optional("$ref", Shape::string(), "")
        .build();

    let response_message = SchemaNode::builder("ResponseMessage")
        .required(
            "code",
            Shape::number(),
            "The HTTP status code returned. The value SHOULD be one of the status codes \
             as described in RFC 2616 - Section 10.",
        )
        .required(
            "message",
            Shape::string(),
            "The explanation for the status code. It SHOULD be the reason an error is \
             received if an error status code is used.",
        )
        .optional("responseModel", Shape::string(), "The return type for the given response.")
        .build();

    let parameter = SchemaNode::builder("Parameter")
        .required(
            "paramType",
            Shape::one_of(PARAM_TYPES),
            "The type of the parameter (that is, the location of the parameter in the \
             request). Note that the values MUST be lower case.",
        )
        .required(
            "name",
            Shape::string(),
            "The unique name for the parameter. Each name MUST be unique, even if they are \
             associated with different paramType values. Parameter names are case sensitive.",
        )
        .required("type", Shape::string(), "Type of the parameter.")
        .optional("format", Shape::string(), "")
        .optional("minimum", Shape::string(), "")
        .optional("maximum", Shape::string(), "")
        .optional("items", Shape::node(&items), "")
        .optional("defaultValue", Shape::string(), "")
        .optional("enum", Shape::array_of(Shape::string_allow_empty()), "")
        .optional("description", Shape::string(), "A brief description of this parameter.")
        .optional(
            "required",
            Shape::boolean(),
            "A flag to note whether this parameter is required. If paramType is \"path\" \
             then this field MUST be included and have the value true.",
        )
        .optional(
            "allowMultiple",
            Shape::boolean(),
            "Another way to allow multiple values for a \"query\" parameter. The field may \
             be used only if paramType is \"query\", \"header\" or \"path\".",
        )
        .build();

    let operation = SchemaNode::builder("Operation")
        .required(
            "method",
            Shape::one_of(HTTP_METHODS),
            "The HTTP method required to invoke this operation. The values MUST be in uppercase.",
        )
        .optional(
            "summary",
            Shape::string(),
            "A short summary of what the operation does. For maximum readability in the \
             swagger-ui, this field SHOULD be less than 120 characters.",
        )
        .optional(
            "notes",
            Shape::string_allow_empty(),
            "A verbose explanation of the operation behavior.",
        )
        .required(
            "nickname",
            Shape::string(),
            "A unique id for the operation that can be used by tools reading the output for \
             further and easier manipulation. The value MUST be alphanumeric and may include \
             underscores. Whitespace characters are not allowed.",
        )
        .optional("authorizations", Shape::Any, AUTHORIZATIONS_DOC)
        .required("type", Shape::string(), "")
        .optional("items", Shape::node(&items), "")
        .optional(
            "parameters",
            Shape::array_of(Shape::node(&parameter)),
            "The inputs to the operation.",
        )
        .optional(
            "responseMessages",
            Shape::array_of(Shape::node(&response_message)),
            "Lists the possible response statuses that can return from the operation.",
        )
        .optional(
            "produces",
            mime_types(),
            "A list of MIME types this operation can produce. This overrides the global \
             produces definition at the root of the API Declaration.",
        )
        .optional(
            "consumes",
            mime_types(),
            "A list of MIME types this operation can consume. This overrides the global \
             consumes definition at the root of the API Declaration.",
        )
        .optional(
            "deprecated",
            Shape::boolean(),
            "Declares this operation to be deprecated.",
        )
        .build();

    let api = SchemaNode::builder("API")
        .required(
            "path",
            Shape::string(),
            "The relative path to the operation, from the basePath, which this operation \
             describes. The value SHOULD be in a relative (URL) path format.",
        )
        .optional("description", Shape::string(), "A short description of the resource.")
        .optional(
            "operations",
            Shape::array_of(Shape::node(&operation)),
            "A list of the API operations available on this path. There MUST NOT be more \
             than one Operation Object per method in the array.",
        )
        .build();

    let property = SchemaNode::builder("Property")
        .optional("type", Shape::string(), "Type of the property.")
        .optional("format", Shape::string(), "")
        .optional("minimum", Shape::string(), "")
        .optional("maximum", Shape::string(), "")
        .optional("required", Shape::boolean(), "")
        .optional("defaultValue", Shape::string(), "")
        .optional("enum", Shape::array_of(Shape::string()), "")
        .optional("$ref", Shape::string(), "")
        .optional("items", Shape::node(&items), "")
        .optional("description", Shape::string(), "A brief description of this property.")
        .build();

    let model = SchemaNode::builder("Model")
        .optional("type", Shape::string(), "")
        .required(
            "id",
            Shape::string(),
            "A unique identifier for the model. This MUST be the name given to {Model Name}.",
        )
        .optional("description", Shape::string(), "A brief description of this model.")
        .optional(
            "required",
            Shape::array_of(Shape::string()),
            "A definition of which properties MUST exist when a model instance is produced. \
             The values MUST be the {Property Name} of one of the properties.",
        )
        .optional("properties", Shape::map_of(Shape::node(&property)), "")
        .optional(
            "subTypes",
            Shape::array_of(Shape::string()),
            "List of the model ids that inherit from this model. There MUST NOT be a cyclic \
             definition of inheritance nor multiple inheritance. All sub-models MUST be \
             defined in the same API Declaration.",
        )
        .optional(
            "discriminator",
            Shape::string(),
            "MUST be included only if subTypes is included. The value MUST be a name of one \
             of the properties in this model, and that field MUST be in the required list.",
        )
        .build();

    let api_reference = SchemaNode::builder("APIReference")
        .required(
            "path",
            Shape::string(),
            "A relative path to the API declaration from the path used to retrieve this \
             Resource Listing.",
        )
        .optional("description", Shape::string(), "A short description of the resource.")
        .build();

    let info = SchemaNode::builder("Info")
        .required("title", Shape::string(), "The title of the application.")
        .required("description", Shape::string(), "A short description of the application.")
        .optional("termsOfServiceUrl", Shape::string(), "A URL to the Terms of Service of the API.")
        .optional(
            "contact",
            Shape::string(),
            "An email to be used for API-related correspondence.",
        )
        .optional("license", Shape::string(), "The license name used for the API.")
        .optional("licenseUrl", Shape::string(), "A URL to the license used for the API.")
        .build();

    let resource_listing = SchemaNode::builder("ResourceListing")
        .required("swaggerVersion", swagger_version(), SWAGGER_VERSION_DOC)
        .optional("apiVersion", Shape::string(), API_VERSION_DOC)
        .optional("basePath", Shape::string(), BASE_PATH_DOC)
        .required(
            "apis",
            Shape::array_of(Shape::node(&api_reference)),
            "Lists the resources to be described by this specification implementation. \
             The array can have 0 or more elements.",
        )
        .optional(
            "info",
            Shape::node(&info),
            "Provides metadata about the API.",
        )
        .optional("authorizations", Shape::Any, AUTHORIZATIONS_DOC)
        .build();

    let api_declaration = SchemaNode::builder("APIDeclaration")
        .required("swaggerVersion", swagger_version(), SWAGGER_VERSION_DOC)
        .optional("apiVersion", Shape::string(), API_VERSION_DOC)
        .optional("basePath", Shape::string(), BASE_PATH_DOC)
        .optional(
            "resourcePath",
            Shape::string(),
            "The relative path to the resource, from the basePath, which this API \
             Specification describes. The value MUST precede with a forward slash (\"/\").",
        )
        .required(
            "apis",
            Shape::array_of(Shape::node(&api)),
            "A list of the APIs exposed on this resource. There MUST NOT be more than one \
             API Object per path in the array.",
        )
        .optional("models", Shape::map_of(Shape::node(&model)), "")
        .optional(
            "produces",
            mime_types(),
            "A list of MIME types the APIs on this resource can produce.",
        )
        .optional(
            "consumes",
            mime_types(),
            "A list of MIME types the APIs on this resource can consume.",
        )
        .optional("authorizations", Shape::Any, AUTHORIZATIONS_DOC)
        .build();

    Registry {
        items,
        response_message,
        parameter,
        operation,
        api,
        property,
        model,
        api_reference,
        info,
        resource_listing,
        api_declaration,
    }
}
