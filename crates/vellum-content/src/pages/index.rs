//! Landing page: obtaining, running and contributing to the IBM FHIR Server.

use std::sync::Arc;

use vellum_layout::Layout;
use vellum_mdx::{attrs, text, Attributes, Frontmatter, MarkupNode};
use vellum_modules::{RegistryError, Resolver};

use crate::site::{Markup, LAYOUT, MARKUP};
use crate::unit::{ContentModule, ContentUnit};

const MAVEN_DEPENDENCY: &str = r#"...
<dependencies>
    <dependency>
      <groupId>com.ibm.fhir</groupId>
      <artifactId>fhir-model</artifactId>
      <version>${fhir.version}</version>
    </dependency>
    ...
</dependencies>
"#;

/// Module factory for the landing page.
pub fn module(ctx: &mut Resolver<'_>) -> Result<ContentModule, RegistryError> {
    let markup = ctx.resolve_as::<Markup>(MARKUP)?;
    let layout = ctx.resolve_as::<Arc<dyn Layout>>(LAYOUT)?;

    let unit = ContentUnit::new(
        ctx.key().clone(),
        Frontmatter::default(),
        Arc::clone(&*layout),
        content(&markup),
        markup.merge,
    );

    Ok(ContentModule::new(unit))
}

/// The page's literal markup.
pub fn content(markup: &Markup) -> Vec<MarkupNode> {
    let c = markup.compose;
    let none = Attributes::new;
    let link = |href: &str, label: &str| c("a", attrs([("href", href)]), vec![text(label)]);

    vec![
        c("br", none(), vec![]),
        text(
            "The server can be packaged as a set of jar files, a web application archive (war), \
             an application installer, or a Docker image.",
        ),
        c(
            "p",
            none(),
            vec![
                text("For a detailed description of FHIR conformance, please see "),
                link("/FHIR/conformance", "Conformance"),
            ],
        ),
        c(
            "h2",
            attrs([("id", "running-the-ibm-fhir-server")]),
            vec![text("Running the IBM FHIR Server")],
        ),
        c(
            "p",
            none(),
            vec![
                text(
                    "The IBM FHIR Server is currently under development. To run the server you \
                     must clone or download the project and build it. See ",
                ),
                link(
                    "https://github.com/IBM/FHIR/wiki/Setting-up-for-development",
                    "https://github.com/IBM/FHIR/wiki/Setting-up-for-development",
                ),
                text(" for more info."),
            ],
        ),
        c(
            "p",
            none(),
            vec![
                text(
                    "Information on installing and running the IBM FHIR Server will be available \
                     in the User Guide at ",
                ),
                link(
                    "https://github.com/ibm/fhir/blob/master/docs/FHIRServerUsersGuide.md",
                    "https://github.com/ibm/fhir/blob/master/docs/FHIRServerUsersGuide.md",
                ),
                text(", but presently this document needs love/attention."),
            ],
        ),
        c(
            "h2",
            attrs([("id", "building-on-top-of-the-ibm-fhir-server")]),
            vec![text("Building on top of the IBM FHIR Server")],
        ),
        c(
            "p",
            none(),
            vec![
                text(
                    "IBM FHIR Server artifacts will become available on JCenter and Maven Central \
                     with a group ID of ",
                ),
                c("inlineCode", none(), vec![text("com.ibm.fhir")]),
                text(" in the near future."),
            ],
        ),
        c(
            "p",
            none(),
            vec![text(
                "For example, if you are using Maven and would like to use our object model \
                 (including our high-performance parser, generator, and validator), you could \
                 declare the dependency like this:",
            )],
        ),
        c(
            "pre",
            none(),
            vec![c(
                "code",
                attrs([("className", "language-xml")]),
                vec![text(MAVEN_DEPENDENCY)],
            )],
        ),
        c(
            "h2",
            attrs([("id", "contributing-to-the-ibm-fhir-server")]),
            vec![text("Contributing to the IBM FHIR Server")],
        ),
        c(
            "p",
            none(),
            vec![
                text("See "),
                link("/FHIR/contributing", "CONTRIBUTING"),
                text("."),
            ],
        ),
    ]
}
