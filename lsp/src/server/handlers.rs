use ropey::Rope;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::LanguageServer;
use tracing::{debug, info, warn};

use crate::analyzer::{
    command_edit, format_document, format_on_type, format_range, DockerAnalyzer, FixTarget, COMMANDS,
    TOKEN_MODIFIERS, TOKEN_TYPES,
};

use super::{
    state::{DockerLanguageServer, Document},
    text::apply_changes,
    utils::compute_content_hash,
};

#[tower_lsp::async_trait]
impl LanguageServer for DockerLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Dockerfile language server initializing with params: {:?}", params.root_uri);
        let configuration = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|w| w.configuration)
            .unwrap_or(false);
        self.set_supports_configuration(configuration);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(
                        ["$", "{", "-", "=", ":", " "].iter().map(|c| c.to_string()).collect(),
                    ),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                document_symbol_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                definition_provider: Some(OneOf::Left(true)),
                document_highlight_provider: Some(OneOf::Left(true)),
                rename_provider: Some(OneOf::Right(RenameOptions {
                    prepare_provider: Some(true),
                    work_done_progress_options: Default::default(),
                })),
                diagnostic_provider: Some(DiagnosticServerCapabilities::Options(DiagnosticOptions {
                    identifier: Some("dockerls".to_string()),
                    inter_file_dependencies: false,
                    workspace_diagnostics: false,
                    work_done_progress_options: Default::default(),
                })),
                semantic_tokens_provider: Some(SemanticTokensServerCapabilities::SemanticTokensOptions(
                    SemanticTokensOptions {
                        work_done_progress_options: Default::default(),
                        legend: SemanticTokensLegend {
                            token_types: TOKEN_TYPES.to_vec(),
                            token_modifiers: TOKEN_MODIFIERS.to_vec(),
                        },
                        range: Some(false),
                        full: Some(SemanticTokensFullOptions::Bool(true)),
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
                    code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                    work_done_progress_options: Default::default(),
                    resolve_provider: Some(false),
                })),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
                    work_done_progress_options: Default::default(),
                }),
                document_formatting_provider: Some(OneOf::Left(true)),
                document_range_formatting_provider: Some(OneOf::Left(true)),
                document_on_type_formatting_provider: Some(DocumentOnTypeFormattingOptions {
                    first_trigger_character: "\n".to_string(),
                    more_trigger_character: None,
                }),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                document_link_provider: Some(DocumentLinkOptions {
                    resolve_provider: Some(false),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "Dockerfile Language Server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("Dockerfile language server initialized");
        let _ = self
            .client
            .log_message(MessageType::INFO, "Dockerfile language server started")
            .await;
        self.load_config().await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Dockerfile language server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, _params: DidChangeConfigurationParams) {
        self.load_config().await;
        self.revalidate_all().await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let document = Document {
            content: Rope::from_str(&params.text_document.text),
            version,
            cached_analysis: None,
            debounce_seq: 0,
            content_hash: Some(compute_content_hash(&params.text_document.text)),
        };
        self.documents.insert(uri.clone(), document);
        self.schedule_diagnostics(uri, version, 0).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let unchanged = {
            let mut entry = self.documents.entry(uri.clone()).or_default();
            entry.version = version;
            apply_changes(&mut entry.content, params.content_changes);
            let hash = compute_content_hash(&entry.content.to_string());
            let unchanged = entry.content_hash == Some(hash) && entry.cached_analysis.is_some();
            if !unchanged {
                entry.content_hash = Some(hash);
                entry.cached_analysis = None;
                entry.debounce_seq = entry.debounce_seq.wrapping_add(1);
            }
            unchanged
        };

        if unchanged {
            debug!("content of {} unchanged at v{}", uri, version);
        }
        // Versions still have to be acknowledged even when the text is identical.
        self.schedule_diagnostics(uri, version, self.debounce_ms()).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri);
        self.document_settings.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        Ok(DockerAnalyzer::new().hover(&analysis.model, position))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        let plan = DockerAnalyzer::new().completion_plan(&analysis.model, position);
        let mut items = plan.items;
        if let Some(query) = plan.image_query {
            let tags = self.tags.tags(&query.repository, query.prefix()).await;
            items.extend(query.items(&tags));
        }
        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = &params.text_document.uri;
        let actions = DockerAnalyzer::new().code_actions(uri, &params.context.diagnostics);
        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<serde_json::Value>> {
        let Some(target) = FixTarget::from_arguments(&params.arguments) else {
            warn!("ignoring {} with malformed arguments", params.command);
            return Ok(None);
        };
        let Some(analysis) = self.get_or_compute_analysis(&target.uri).await else {
            return Ok(None);
        };
        let Some(edit) = command_edit(&analysis.model, &params.command, &target) else {
            debug!("{} produced no edit", params.command);
            return Ok(None);
        };
        match self.client.apply_edit(edit).await {
            Ok(response) if !response.applied => {
                warn!("client rejected {}: {:?}", params.command, response.failure_reason);
            }
            Ok(_) => {}
            Err(err) => warn!("applyEdit for {} failed: {}", params.command, err),
        }
        Ok(None)
    }

    async fn diagnostic(&self, params: DocumentDiagnosticParams) -> Result<DocumentDiagnosticReportResult> {
        let uri = &params.text_document.uri;
        let diagnostics = self.validate_document(uri).await;

        Ok(DocumentDiagnosticReportResult::Report(DocumentDiagnosticReport::Full(
            RelatedFullDocumentDiagnosticReport {
                related_documents: None,
                full_document_diagnostic_report: FullDocumentDiagnosticReport {
                    result_id: None,
                    items: diagnostics,
                },
            },
        )))
    }

    async fn document_symbol(&self, params: DocumentSymbolParams) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;
        if let Some(analysis) = self.get_or_compute_analysis(uri).await {
            if !analysis.symbols.is_empty() {
                return Ok(Some(DocumentSymbolResponse::Nested(analysis.symbols.clone())));
            }
        }
        Ok(None)
    }

    async fn goto_definition(&self, params: GotoDefinitionParams) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        Ok(DockerAnalyzer::new()
            .definition(&analysis.model, uri, position)
            .map(GotoDefinitionResponse::Scalar))
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        let locations = DockerAnalyzer::new().references(
            &analysis.model,
            uri,
            position,
            params.context.include_declaration,
        );
        Ok((!locations.is_empty()).then_some(locations))
    }

    async fn document_highlight(&self, params: DocumentHighlightParams) -> Result<Option<Vec<DocumentHighlight>>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        let highlights = DockerAnalyzer::new().document_highlights(&analysis.model, position);
        Ok((!highlights.is_empty()).then_some(highlights))
    }

    async fn prepare_rename(&self, params: TextDocumentPositionParams) -> Result<Option<PrepareRenameResponse>> {
        let Some(analysis) = self.get_or_compute_analysis(&params.text_document.uri).await else {
            return Ok(None);
        };
        Ok(DockerAnalyzer::new().prepare_rename(&analysis.model, params.position))
    }

    async fn rename(&self, params: RenameParams) -> Result<Option<WorkspaceEdit>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        Ok(DockerAnalyzer::new().rename(&analysis.model, uri, position, &params.new_name))
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let uri = &params.text_document.uri;
        let settings = self.settings_for(uri).await;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        Ok(Some(format_document(&analysis.model, &params.options, &settings.formatter)))
    }

    async fn range_formatting(&self, params: DocumentRangeFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let uri = &params.text_document.uri;
        let settings = self.settings_for(uri).await;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        Ok(Some(format_range(
            &analysis.model,
            params.range,
            &params.options,
            &settings.formatter,
        )))
    }

    async fn on_type_formatting(&self, params: DocumentOnTypeFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let uri = &params.text_document_position.text_document.uri;
        let settings = self.settings_for(uri).await;
        let Some(analysis) = self.get_or_compute_analysis(uri).await else {
            return Ok(None);
        };
        let edits = format_on_type(
            &analysis.model,
            params.text_document_position.position,
            &params.ch,
            &params.options,
            &settings.formatter,
        );
        Ok((!edits.is_empty()).then_some(edits))
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let Some(analysis) = self.get_or_compute_analysis(&params.text_document.uri).await else {
            return Ok(None);
        };
        let ranges = DockerAnalyzer::new().folding_ranges(&analysis.model);
        Ok((!ranges.is_empty()).then_some(ranges))
    }

    async fn document_link(&self, params: DocumentLinkParams) -> Result<Option<Vec<DocumentLink>>> {
        let Some(analysis) = self.get_or_compute_analysis(&params.text_document.uri).await else {
            return Ok(None);
        };
        let links = DockerAnalyzer::new().document_links(&analysis.model);
        Ok((!links.is_empty()).then_some(links))
    }

    async fn semantic_tokens_full(&self, params: SemanticTokensParams) -> Result<Option<SemanticTokensResult>> {
        let Some(analysis) = self.get_or_compute_analysis(&params.text_document.uri).await else {
            return Ok(None);
        };
        let data = DockerAnalyzer::new().semantic_tokens(&analysis.model);
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens { result_id: None, data })))
    }
}
