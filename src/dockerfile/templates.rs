//! Static Dockerfile fallback templates
//!
//! Used whenever the LLM path is unavailable or fails. Selection is keyed
//! on the detected language, with a Node.js template as the final default.
//! The Node and Python families carry comment-free variants; the rest ship
//! one canonical form.

use crate::detection::project::ProjectTechnology;

/// Picks the fallback template for a detected technology.
pub fn fallback_dockerfile(
    tech: &ProjectTechnology,
    has_build_script: bool,
    ignore_comments: bool,
) -> String {
    match tech.language.as_str() {
        "javascript" | "typescript" => {
            if tech.build_tool == "vite" || tech.framework == "react" || tech.framework == "vue" {
                vite_template(ignore_comments)
            } else if has_build_script {
                node_with_build_template(ignore_comments)
            } else {
                node_template(ignore_comments)
            }
        }
        "python" => python_template(ignore_comments),
        "go" => go_template(ignore_comments),
        "java" => java_template(tech),
        "rust" => rust_template(),
        "php" => php_template(tech),
        "ruby" => ruby_template(tech),
        _ => node_template(ignore_comments),
    }
}

fn node_template(ignore_comments: bool) -> String {
    if ignore_comments {
        return "\
FROM node:alpine AS builder
WORKDIR /workspace/app
COPY --chown=node:node package*.json ./
RUN npm ci --only=production && npm cache clean --force
COPY --chown=node:node . .

FROM node:alpine
WORKDIR /workspace/app
COPY --from=builder --chown=node:node /workspace/app .
ENTRYPOINT [\"npm\", \"run\", \"start\"]
"
        .to_string();
    }

    "\
# Build stage
FROM node:alpine AS builder

WORKDIR /workspace/app

COPY --chown=node:node package*.json ./
RUN npm ci --only=production && npm cache clean --force

COPY --chown=node:node . .

# Production stage
FROM node:alpine

WORKDIR /workspace/app

COPY --from=builder --chown=node:node /workspace/app .

ENTRYPOINT [\"npm\", \"run\", \"start\"]

# Example: docker run -p 3000:3000 image-name
"
    .to_string()
}

fn node_with_build_template(ignore_comments: bool) -> String {
    if ignore_comments {
        return "\
FROM node:alpine AS builder
WORKDIR /workspace/app
COPY --chown=node:node . .
RUN npm ci --only=production && npm run build && npm cache clean --force

FROM node:alpine
WORKDIR /workspace/app
COPY --from=builder --chown=node:node /workspace/app/dist .
ENTRYPOINT [\"npm\", \"run\", \"start\"]
"
        .to_string();
    }

    "\
# Build stage
FROM node:alpine AS builder

WORKDIR /workspace/app

COPY --chown=node:node . .

RUN npm ci --only=production && npm run build && npm cache clean --force

# Production stage
FROM node:alpine

WORKDIR /workspace/app

COPY --from=builder --chown=node:node /workspace/app/dist .

ENTRYPOINT [\"npm\", \"run\", \"start\"]

# Example: docker run -p 3000:3000 image-name
"
    .to_string()
}

fn vite_template(ignore_comments: bool) -> String {
    if ignore_comments {
        return "\
FROM node:alpine AS builder
WORKDIR /workspace/app
COPY --chown=node:node . /workspace/app
RUN npm ci --only=production && npm run build && npm cache clean --force

FROM node:alpine
COPY --from=builder --chown=node:node /workspace/app/dist /app
WORKDIR /app
CMD [\"npx\", \"serve\", \"-p\", \"3000\", \"-s\", \"/app\"]
"
        .to_string();
    }

    "\
# Build stage
FROM node:alpine AS builder

WORKDIR /workspace/app

COPY --chown=node:node . /workspace/app

RUN npm ci --only=production && npm run build && npm cache clean --force

# Production stage
FROM node:alpine

COPY --from=builder --chown=node:node /workspace/app/dist /app

WORKDIR /app

CMD [\"npx\", \"serve\", \"-p\", \"3000\", \"-s\", \"/app\"]

# Example: docker run -p 3000:3000 image-name
"
    .to_string()
}

fn python_template(ignore_comments: bool) -> String {
    if ignore_comments {
        return "\
FROM python:3.11-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

CMD [\"python\", \"app.py\"]
"
        .to_string();
    }

    "\
# Use Python slim image
FROM python:3.11-slim

# Set working directory
WORKDIR /app

# Copy and install dependencies
COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

# Copy application code
COPY . .

# Run the application
CMD [\"python\", \"app.py\"]

# Example: docker run -p 8000:8000 image-name
"
    .to_string()
}

fn go_template(ignore_comments: bool) -> String {
    if ignore_comments {
        return "\
FROM golang:alpine AS builder

WORKDIR /app
COPY go.mod go.sum ./
RUN go mod download
COPY . .
RUN CGO_ENABLED=0 GOOS=linux go build -o main .

FROM alpine:latest
WORKDIR /app
COPY --from=builder /app/main .
CMD [\"./main\"]
"
        .to_string();
    }

    "\
# Build stage
FROM golang:alpine AS builder

WORKDIR /app

# Download dependencies
COPY go.mod go.sum ./
RUN go mod download

# Build the application
COPY . .
RUN CGO_ENABLED=0 GOOS=linux go build -o main .

# Production stage
FROM alpine:latest

WORKDIR /app

# Copy binary from builder
COPY --from=builder /app/main .

# Run the application
CMD [\"./main\"]

# Example: docker run -p 8080:8080 image-name
"
    .to_string()
}

fn java_template(tech: &ProjectTechnology) -> String {
    if tech.package_manager == "gradle" {
        return "\
# Build stage
FROM gradle:jdk17-alpine AS builder
WORKDIR /app
COPY . .
RUN gradle build --no-daemon

# Production stage
FROM eclipse-temurin:17-jre-alpine
WORKDIR /app
COPY --from=builder /app/build/libs/*.jar app.jar
CMD [\"java\", \"-jar\", \"app.jar\"]
"
        .to_string();
    }

    "\
# Build stage
FROM maven:3.9-eclipse-temurin-17-alpine AS builder
WORKDIR /app
COPY pom.xml .
RUN mvn dependency:go-offline
COPY src ./src
RUN mvn package -DskipTests

# Production stage
FROM eclipse-temurin:17-jre-alpine
WORKDIR /app
COPY --from=builder /app/target/*.jar app.jar
CMD [\"java\", \"-jar\", \"app.jar\"]
"
    .to_string()
}

fn rust_template() -> String {
    "\
# Build stage
FROM rust:alpine AS builder
WORKDIR /app
COPY Cargo.toml Cargo.lock ./
RUN mkdir src && echo \"fn main() {}\" > src/main.rs && cargo build --release && rm -rf src
COPY . .
RUN cargo build --release

# Production stage
FROM alpine:latest
WORKDIR /app
COPY --from=builder /app/target/release/app .
CMD [\"./app\"]
"
    .to_string()
}

fn php_template(tech: &ProjectTechnology) -> String {
    if tech.framework == "laravel" {
        return "\
FROM php:8.2-fpm-alpine

WORKDIR /app

RUN docker-php-ext-install pdo pdo_mysql

COPY --from=composer:latest /usr/bin/composer /usr/bin/composer

COPY composer.json composer.lock ./
RUN composer install --no-dev --optimize-autoloader

COPY . .

CMD [\"php-fpm\"]
"
        .to_string();
    }

    "\
FROM php:8.2-apache

WORKDIR /var/www/html

RUN docker-php-ext-install pdo pdo_mysql

COPY . .

RUN chown -R www-data:www-data /var/www/html

CMD [\"apache2-foreground\"]
"
    .to_string()
}

fn ruby_template(tech: &ProjectTechnology) -> String {
    if tech.framework == "rails" {
        return "\
FROM ruby:3.2-alpine

WORKDIR /app

COPY Gemfile Gemfile.lock ./
RUN bundle install --without development test

COPY . .

RUN bundle exec rake assets:precompile

CMD [\"rails\", \"server\", \"-b\", \"0.0.0.0\"]
"
        .to_string();
    }

    "\
FROM ruby:3.2-alpine

WORKDIR /app

COPY Gemfile Gemfile.lock ./
RUN bundle install

COPY . .

CMD [\"ruby\", \"app.rb\"]
"
    .to_string()
}
